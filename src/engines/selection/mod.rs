pub mod top_n;

pub use top_n::{HyperparameterTable, LOOKAHEAD_COLUMN, TEST_LENGTH_COLUMN, TRAIN_LENGTH_COLUMN};
