use factorcv::config::PredictionConfig;
use factorcv::data::{PanelDataset, PanelSchema};
use factorcv::engines::prediction::{
    CsvSink, FittedModel, PredictionReport, Regressor, ResultsSink, WalkForwardPredictor,
    ENSEMBLE_LABEL,
};
use factorcv::types::CandidateParams;
use factorcv::FactorcvError;
use polars::prelude::*;
use std::collections::BTreeMap;

const TICKERS: [&str; 3] = ["AAA", "BBB", "CCC"];

/// Panel whose target is a monotone function of `momentum` on every date
fn panel(periods: i64) -> PanelDataset {
    let mut dates = Vec::new();
    let mut tickers = Vec::new();
    let mut momentum = Vec::new();
    let mut target = Vec::new();
    for date in 1..=periods {
        for (t, ticker) in TICKERS.iter().enumerate() {
            let value = ((t as i64 * 7 + date * 3) % 11) as f64;
            dates.push(date);
            tickers.push(ticker.to_string());
            momentum.push(value);
            target.push(value * 0.01);
        }
    }

    let df = df! {
        "date" => dates,
        "ticker" => tickers,
        "momentum" => momentum,
        "target" => target,
    }
    .unwrap();

    PanelDataset::new(df, PanelSchema::new("ticker", "date", "target", &["momentum"])).unwrap()
}

fn candidate(position: usize, train: usize, test: usize, lookahead: usize) -> CandidateParams {
    CandidateParams {
        position,
        train_period_length: train,
        test_period_length: test,
        lookahead,
        metric: "daily_ic_mean".to_string(),
        metric_value: 0.05,
        model_params: BTreeMap::new(),
    }
}

fn predictor(parallel: bool) -> WalkForwardPredictor {
    WalkForwardPredictor::new(&PredictionConfig {
        n_splits: 4,
        parallel,
        output_path: None,
    })
}

/// Predicts the momentum feature as is
struct FeatureEcho;

struct EchoModel;

impl FittedModel for EchoModel {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, FactorcvError> {
        Ok(features
            .column("momentum")?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(0.0))
            .collect())
    }
}

impl Regressor for FeatureEcho {
    fn name(&self) -> &str {
        "feature_echo"
    }

    fn fit(
        &self,
        _params: &CandidateParams,
        features: &DataFrame,
        labels: &[f64],
    ) -> Result<Box<dyn FittedModel>, FactorcvError> {
        assert_eq!(features.width(), 1);
        assert_eq!(features.height(), labels.len());
        Ok(Box::new(EchoModel))
    }
}

/// Predicts the mean training label for every row
struct MeanRegressor;

struct ConstantModel(f64);

impl FittedModel for ConstantModel {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, FactorcvError> {
        Ok(vec![self.0; features.height()])
    }
}

impl Regressor for MeanRegressor {
    fn name(&self) -> &str {
        "mean"
    }

    fn fit(
        &self,
        _params: &CandidateParams,
        _features: &DataFrame,
        labels: &[f64],
    ) -> Result<Box<dyn FittedModel>, FactorcvError> {
        let mean = labels.iter().sum::<f64>() / labels.len() as f64;
        Ok(Box::new(ConstantModel(mean)))
    }
}

/// Returns one prediction too few
struct ShortRegressor;

impl Regressor for ShortRegressor {
    fn name(&self) -> &str {
        "short"
    }

    fn fit(
        &self,
        _params: &CandidateParams,
        _features: &DataFrame,
        _labels: &[f64],
    ) -> Result<Box<dyn FittedModel>, FactorcvError> {
        struct Short;
        impl FittedModel for Short {
            fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, FactorcvError> {
                Ok(vec![0.0; features.height().saturating_sub(1)])
            }
        }
        Ok(Box::new(Short))
    }
}

/// Fails to fit
struct FailingRegressor;

impl Regressor for FailingRegressor {
    fn name(&self) -> &str {
        "failing"
    }

    fn fit(
        &self,
        _params: &CandidateParams,
        _features: &DataFrame,
        _labels: &[f64],
    ) -> Result<Box<dyn FittedModel>, FactorcvError> {
        Err(FactorcvError::Model("singular matrix".to_string()))
    }
}

#[test]
fn test_candidates_produce_out_of_sample_predictions() {
    let panel = panel(60);
    let candidates = vec![candidate(0, 20, 5, 1), candidate(1, 10, 10, 0)];

    let report = predictor(false).run(&panel, &candidates, &FeatureEcho).unwrap();

    assert_eq!(report.regressor, "feature_echo");
    assert_eq!(report.candidates.len(), 2);

    let first = &report.candidates[0];
    assert_eq!(first.folds, 4);
    assert_eq!(first.predictions.len(), 4 * 5 * TICKERS.len());
    assert_eq!(first.daily_ic.len(), 20);
    assert!((first.ic.mean - 1.0).abs() < 1e-9);
    assert!(first.predictions.iter().all(|r| r.timestamp > 40));
    assert!(first.predictions.iter().all(|r| matches!(r.fold, Some(f) if f < 4)));

    let second = &report.candidates[1];
    assert_eq!(second.predictions.len(), 4 * 10 * TICKERS.len());
    assert!(second.predictions.iter().all(|r| r.timestamp > 20));

    // union of both candidates' test periods, one row per (entity, date)
    assert_eq!(report.ensemble.len(), 40 * TICKERS.len());
    assert!((report.ensemble_ic.mean - 1.0).abs() < 1e-9);
    assert!(report.ensemble.iter().all(|r| r.fold.is_none()));
    assert!(report.best().is_some());
}

#[test]
fn test_report_orders_candidates_by_position() {
    let panel = panel(60);
    let candidates = vec![candidate(0, 20, 5, 1), candidate(1, 20, 5, 1)];
    let report = predictor(false).run(&panel, &candidates, &FeatureEcho).unwrap();

    let mut reversed = report.candidates.clone();
    reversed.reverse();
    let rebuilt = PredictionReport::from_candidates("feature_echo", reversed);

    let positions: Vec<usize> = rebuilt.candidates.iter().map(|c| c.params.position).collect();
    assert_eq!(positions, vec![0, 1]);
    assert_eq!(rebuilt.ensemble, report.ensemble);

    // identical predictions tie on IC, lowest position wins
    assert_eq!(rebuilt.candidates[0].ic.mean, rebuilt.candidates[1].ic.mean);
    assert_eq!(rebuilt.best().map(|c| c.params.position), Some(0));
}

#[test]
fn test_parallel_matches_sequential() {
    let panel = panel(80);
    let candidates: Vec<CandidateParams> = (0..6)
        .map(|i| candidate(i, 10 + i * 2, 5, i % 3))
        .collect();

    let sequential = predictor(false).run(&panel, &candidates, &FeatureEcho).unwrap();
    let parallel = predictor(true).run(&panel, &candidates, &FeatureEcho).unwrap();

    let positions: Vec<usize> = parallel.candidates.iter().map(|c| c.params.position).collect();
    assert_eq!(positions, (0..6).collect::<Vec<_>>());
    for (a, b) in sequential.candidates.iter().zip(&parallel.candidates) {
        assert_eq!(a.predictions, b.predictions);
    }
    assert_eq!(sequential.ensemble, parallel.ensemble);
}

#[test]
fn test_flat_predictions_have_no_ic() {
    let panel = panel(60);
    let report = predictor(false)
        .run(&panel, &[candidate(0, 20, 5, 1)], &MeanRegressor)
        .unwrap();

    assert_eq!(report.candidates[0].predictions.len(), 60);
    assert_eq!(report.candidates[0].ic.count, 0);
    assert!(report.best().is_none());
}

#[test]
fn test_insufficient_history_yields_empty_candidate() {
    let panel = panel(10);
    let report = predictor(true)
        .run(&panel, &[candidate(0, 20, 5, 1)], &FeatureEcho)
        .unwrap();

    assert_eq!(report.candidates[0].folds, 0);
    assert!(report.candidates[0].predictions.is_empty());
    assert!(report.ensemble.is_empty());
}

#[test]
fn test_model_failures_propagate() {
    let panel = panel(60);
    let candidates = [candidate(0, 20, 5, 1)];

    let short = predictor(false).run(&panel, &candidates, &ShortRegressor);
    assert!(matches!(short, Err(FactorcvError::Model(_))));

    let failing = predictor(true).run(&panel, &candidates, &FailingRegressor);
    match failing {
        Err(FactorcvError::Model(message)) => assert_eq!(message, "singular matrix"),
        other => panic!("unexpected result: {:?}", other.map(|r| r.regressor)),
    }
}

#[test]
fn test_csv_sink_writes_long_format() {
    let panel = panel(60);
    let report = predictor(false)
        .run(&panel, &[candidate(0, 20, 5, 1), candidate(1, 20, 5, 2)], &FeatureEcho)
        .unwrap();

    let path = std::env::temp_dir().join(format!("factorcv_predictions_{}.csv", std::process::id()));
    CsvSink::new(&path).write(&report).unwrap();

    let written = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.clone()))
        .unwrap()
        .finish()
        .unwrap();
    std::fs::remove_file(&path).ok();

    let expected = report.candidates.iter().map(|c| c.predictions.len()).sum::<usize>()
        + report.ensemble.len();
    assert_eq!(written.height(), expected);

    let labels = written.column("candidate").unwrap().cast(&DataType::String).unwrap();
    let ensemble_rows = labels
        .str()
        .unwrap()
        .into_iter()
        .filter(|v| *v == Some(ENSEMBLE_LABEL))
        .count();
    assert_eq!(ensemble_rows, report.ensemble.len());
    // ensemble rows have no fold
    assert_eq!(written.column("fold").unwrap().null_count(), report.ensemble.len());

    let summary = report.summary_json().unwrap();
    assert!(summary.contains("feature_echo"));
}
