use anyhow::{bail, Context, Result};
use factorcv::config::ConfigManager;
use factorcv::data::CsvConnector;
use factorcv::engines::selection::HyperparameterTable;
use factorcv::engines::splitters::WalkForwardSplitter;

fn main() -> Result<()> {
    env_logger::init();

    let Some(config_path) = std::env::args().nth(1) else {
        bail!("usage: factorcv <config.toml>");
    };

    let config = ConfigManager::load_layered(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    let panel = CsvConnector::load_panel(&config.data).context("loading panel")?;
    let metadata = panel.metadata()?;
    println!(
        "Panel: {} rows, {} entities, {} periods ({} .. {})",
        metadata.num_rows,
        metadata.num_entities,
        metadata.num_periods,
        metadata.first_period.as_deref().unwrap_or("-"),
        metadata.last_period.as_deref().unwrap_or("-"),
    );

    let splitter = WalkForwardSplitter::new(config.splitter.clone())?
        .with_time_column(&config.data.time_column);
    let splits = splitter.split_panel(&panel)?;
    let index = splits.time_index().clone();

    println!(
        "{:>4}  {:>21}  {:>21}  {:>10}  {:>10}",
        "fold", "train", "test", "train_rows", "test_rows"
    );
    for split in splits {
        println!(
            "{:>4}  {:>10}..{:<10}  {:>10}..{:<10}  {:>10}  {:>10}",
            split.fold_num,
            index.format_period(split.train_start),
            index.format_period(split.train_end),
            index.format_period(split.test_start),
            index.format_period(split.test_end),
            split.train.len(),
            split.test.len(),
        );
    }

    if config.selection.metrics_path.is_some() {
        let table = HyperparameterTable::from_config(&config.selection)
            .context("loading hyperparameter metrics")?;
        let candidates = table.top_n(
            &config.selection.metric,
            config.selection.top_n,
            config.selection.lookahead,
        )?;

        println!("\nTop {} by {}:", candidates.len(), config.selection.metric);
        for candidate in &candidates {
            println!(
                "{:>3}  train={:<4} test={:<4} lookahead={:<3} {}={:.5} {:?}",
                candidate.position,
                candidate.train_period_length,
                candidate.test_period_length,
                candidate.lookahead,
                candidate.metric,
                candidate.metric_value,
                candidate.model_params,
            );
        }
    }

    Ok(())
}
