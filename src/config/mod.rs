#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::cli::CartCommand;
    use crate::core::cart::DEFAULT_STORAGE_KEY;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "cart")]
    #[command(about = "Manage a storefront shopping cart")]
    pub struct CliConfig {
        /// TOML configuration file; takes precedence over the flags below
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        #[arg(long, global = true, default_value = "http://localhost:3333")]
        pub api_base_url: String,

        #[arg(long, global = true, default_value = "./.cart")]
        pub storage_path: String,

        #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
        pub storage_key: String,

        #[arg(long, global = true)]
        pub timeout_seconds: Option<u64>,

        /// Fail instead of starting empty when the saved cart is malformed
        #[arg(long, global = true)]
        pub strict_load: bool,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: CartCommand,
    }

    impl ConfigProvider for CliConfig {
        fn inventory_url(&self) -> &str {
            &self.api_base_url
        }

        fn storage_path(&self) -> &str {
            &self.storage_path
        }

        fn storage_key(&self) -> &str {
            &self.storage_key
        }

        fn request_timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }

        fn strict_load(&self) -> bool {
            self.strict_load
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("api_base_url", &self.api_base_url)?;
            validation::validate_path("storage_path", &self.storage_path)?;
            validation::validate_storage_key("storage_key", &self.storage_key)?;
            if let Some(timeout) = self.timeout_seconds {
                validation::validate_range("timeout_seconds", timeout, 1, 300)?;
            }
            Ok(())
        }
    }

}
