use burn::config::Config;

use crate::error::Error;

/// Settings for [`crate::load_data`].
#[derive(Config, Debug)]
pub struct LoaderConfig {
    /// Rows per mini-batch.
    pub batch_size: usize,
    /// Fraction of batches held out for testing.
    #[config(default = 0.1)]
    pub test_size: f64,
    /// Permute rows before batching. When off, batches follow time order.
    #[config(default = true)]
    pub shuffle: bool,
    /// Seed of the train/test split, fixed so the split is reproducible.
    #[config(default = 0)]
    pub split_seed: u64,
    /// Seed of the row permutation; drawn from entropy when unset.
    pub shuffle_seed: Option<u64>,
    #[config(default = "String::from(\"date\")")]
    pub date_column: String,
    #[config(default = "String::from(\"DAX\")")]
    pub target_column: String,
}

impl LoaderConfig {
    /// Rejects settings that would only fail after the file has been read.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(Error::InvalidTestSize(self.test_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn defaults() {
        let config = LoaderConfig::new(32);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.test_size, 0.1);
        assert!(config.shuffle);
        assert_eq!(config.split_seed, 0);
        assert_eq!(config.shuffle_seed, None);
        assert_eq!(config.date_column, "date");
        assert_eq!(config.target_column, "DAX");
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn rejects_zero_batch_size() {
        let err = LoaderConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidBatchSize));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.5)]
    fn rejects_bad_test_size(#[case] test_size: f64) {
        let err = LoaderConfig::new(8)
            .with_test_size(test_size)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTestSize(_)));
    }

    #[rstest]
    fn survives_a_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.json");
        let config = LoaderConfig::new(16)
            .with_shuffle(false)
            .with_shuffle_seed(Some(42))
            .with_target_column("close".into());
        config.save(&path).unwrap();

        let loaded = LoaderConfig::load(&path).unwrap();
        assert_eq!(loaded.batch_size, 16);
        assert!(!loaded.shuffle);
        assert_eq!(loaded.shuffle_seed, Some(42));
        assert_eq!(loaded.target_column, "close");
        assert_eq!(loaded.date_column, "date");
    }
}
