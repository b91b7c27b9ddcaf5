use factorcv::config::SelectionConfig;
use factorcv::data::CsvConnector;
use factorcv::engines::selection::HyperparameterTable;
use factorcv::FactorcvError;
use polars::prelude::*;

fn metrics_table() -> DataFrame {
    df! {
        "train_length" => &[1134i64, 756, 252, 126, 63, 252],
        "test_length" => &[63i64, 63, 21, 21, 21, 63],
        "lookahead" => &[1i64, 1, 5, 1, 5, 1],
        "learning_rate" => &[0.01, 0.1, 0.3, 0.01, 0.1, 0.3],
        "num_leaves" => &[32i64, 64, 128, 32, 64, 256],
        "daily_ic_mean" => &[Some(0.021), Some(0.034), Some(0.012), None, Some(0.040), Some(0.018)],
    }
    .unwrap()
}

fn table() -> HyperparameterTable {
    HyperparameterTable::new(
        metrics_table(),
        vec!["learning_rate".to_string(), "num_leaves".to_string()],
    )
    .unwrap()
}

#[test]
fn test_top_n_sorted_descending() {
    let top = table().top_n("daily_ic_mean", 3, None).unwrap();

    let values: Vec<f64> = top.iter().map(|c| c.metric_value).collect();
    assert_eq!(values, vec![0.040, 0.034, 0.021]);

    let positions: Vec<usize> = top.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);

    assert_eq!(top[0].train_period_length, 63);
    assert_eq!(top[0].test_period_length, 21);
    assert_eq!(top[0].lookahead, 5);
    assert_eq!(top[0].model_params.get("num_leaves"), Some(&64.0));
    assert_eq!(top[0].model_params.get("learning_rate"), Some(&0.1));
}

#[test]
fn test_top_n_filters_lookahead() {
    let top = table().top_n("daily_ic_mean", 10, Some(1)).unwrap();

    assert_eq!(top.len(), 4);
    assert!(top.iter().all(|c| c.lookahead == 1));
    assert_eq!(top[0].metric_value, 0.034);
    // null metric ranks last
    assert!(top[3].metric_value.is_nan());
}

#[test]
fn test_unknown_metric() {
    let result = table().top_n("sharpe", 3, None);
    assert!(matches!(result, Err(FactorcvError::Selection(_))));
}

#[test]
fn test_from_config_csv() {
    let path = std::env::temp_dir().join(format!("factorcv_metrics_{}.csv", std::process::id()));
    let mut df = metrics_table();
    CsvConnector::write(&path, &mut df).unwrap();

    let config = SelectionConfig {
        metrics_path: Some(path.to_string_lossy().to_string()),
        top_n: 2,
        param_columns: vec!["num_leaves".to_string()],
        ..SelectionConfig::default()
    };
    let table = HyperparameterTable::from_config(&config);
    std::fs::remove_file(&path).ok();

    let top = table
        .unwrap()
        .top_n(&config.metric, config.top_n, config.lookahead)
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[1].train_period_length, 756);
    assert_eq!(top[1].model_params.len(), 1);
}
