use cart_store::core::ConfigProvider;
use cart_store::domain::ports::NotificationSink;
use cart_store::utils::error::ErrorSeverity;
use cart_store::utils::{logger, validation::Validate};
use cart_store::{
    BufferedNotifier, Cart, CartCommand, CartConfig, CartContext, CartError, CartStore,
    CliConfig, ConsoleNotifier, HttpInventory, LocalStorage,
};
use clap::Parser;
use std::collections::HashMap;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match CartConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                return ExitCode::from(1);
            }
        },
        None => None,
    };

    match &file_config {
        Some(config) if config.json_logs() => {
            logger::init_json_logger(if cli.verbose { "debug" } else { config.log_level() })
        }
        Some(config) => {
            logger::init_cli_logger(cli.verbose || matches!(config.log_level(), "debug" | "trace"))
        }
        None => logger::init_cli_logger(cli.verbose),
    }

    tracing::debug!("CLI config: {:?}", cli);

    let validation = match &file_config {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        return ExitCode::from(1);
    }

    let result = match &file_config {
        Some(config) => run(config, config.headers(), &cli.command).await,
        None => run(&cli, HashMap::new(), &cli.command).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(
                "❌ Cart command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            match e.severity() {
                ErrorSeverity::Low => ExitCode::SUCCESS,
                ErrorSeverity::Medium => ExitCode::from(2),
                ErrorSeverity::High => ExitCode::from(1),
                ErrorSeverity::Critical => ExitCode::from(3),
            }
        }
    }
}

/// Runs one command; `Ok(false)` means the user was shown an error notification.
async fn run<C: ConfigProvider>(
    config: &C,
    headers: HashMap<String, String>,
    command: &CartCommand,
) -> Result<bool, CartError> {
    let inventory = HttpInventory::from_config(config).with_headers(headers);
    let storage = LocalStorage::new(config.storage_path());
    let store = CartStore::from_config(inventory, storage, config).await?;

    tracing::info!(
        "🛒 Cart loaded from {} (key '{}')",
        config.storage_path(),
        store.storage_key()
    );

    let notifier = BufferedNotifier::new();
    let context = CartContext::new(store, notifier.clone());

    match command {
        CartCommand::Show => {}
        CartCommand::Add { product_id } => context.add_product((*product_id).into()).await,
        CartCommand::Remove { product_id } => context.remove_product((*product_id).into()).await,
        CartCommand::Update { .. } => {
            if let Some(request) = command.update_request() {
                context.update_product_amount(request).await
            }
        }
    }

    let failures = notifier.drain();
    for message in &failures {
        ConsoleNotifier.notify_error(message);
    }

    print_cart(&context.cart().await);
    Ok(failures.is_empty())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart {
        println!(
            "{:>6}  {:<40} {:>3} x {:>10.2} = {:>10.2}",
            item.id.get(),
            item.name,
            item.amount,
            item.price,
            item.subtotal()
        );
    }
    println!(
        "{} products, {} units, total {:.2}",
        cart.item_count(),
        cart.total_units(),
        cart.total()
    );
}
