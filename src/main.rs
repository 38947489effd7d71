use std::env;

use tracing_subscriber::EnvFilter;
use wgan_trainer::app::{self, AppConfig};
use wgan_trainer::data::{DataLoader, TensorDataset, load_samples_npy};
use wgan_trainer::errors::WganError;
use wgan_trainer::gan::SAMPLE_DIM;

/// 指向 JSON 配置文件的环境变量；未设置时使用默认配置
const CONFIG_ENV: &str = "WGAN_CONFIG";

fn main() -> Result<(), WganError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match env::var_os(CONFIG_ENV) {
        Some(path) => AppConfig::from_json_file(path)?,
        None => AppConfig::default(),
    };

    let samples = load_samples_npy(&config.data_path, SAMPLE_DIM)?;
    let mut loader =
        DataLoader::new(TensorDataset::unlabeled(samples)?, config.batch_size)?.shuffle(config.shuffle);
    if let Some(seed) = config.training.seed {
        loader = loader.seed(seed);
    }
    tracing::info!(
        samples = loader.len(),
        batches = loader.num_batches(),
        "真实样本已加载"
    );

    app::run(&config, &loader)?;
    Ok(())
}
