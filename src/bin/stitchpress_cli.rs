//! StitchPress CLI - Bridge interface for the storefront
//!
//! Commands: catalog, quote, render-size, configure
//! Outputs JSON to stdout
//! Returns non-zero on validation failure

use base64::Engine as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;

use stitchpress_core::{
    Axis, Cart, ConfigSession, PhysicalSize, PriceQuote, ProductCatalog, ProductColor,
    ProductType, Resolution, SizeLabel,
};

#[derive(Parser)]
#[command(name = "stitchpress-cli")]
#[command(about = "StitchPress CLI - Custom Garment Configurator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to catalog overrides directory
    #[arg(short, long, default_value = "catalog")]
    catalog_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries with base prices and size presets
    Catalog,

    /// Quote a price for a product type and design dimensions
    Quote {
        /// Product type (hoodie | t-shirt)
        #[arg(short, long)]
        product_type: String,

        /// Design width in inches
        #[arg(short, long)]
        width: f64,

        /// Design height in inches
        #[arg(long)]
        height: f64,
    },

    /// Project physical dimensions into render-space pixels
    RenderSize {
        /// Design width in inches
        #[arg(short, long)]
        width: f64,

        /// Design height in inches
        #[arg(long)]
        height: f64,

        /// Resolution in pixels per inch
        #[arg(short, long, default_value_t = 96.0)]
        ppi: f64,
    },

    /// Run a full configuration and emit the artifact and cart handoff
    Configure {
        /// JSON payload (ConfigureRequest)
        #[arg(short, long)]
        payload: String,

        /// Resolution in pixels per inch
        #[arg(long, default_value_t = 96.0)]
        ppi: f64,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigureRequest {
    product_type: ProductType,
    color: ProductColor,
    size: SizeLabel,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    design: DesignPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DesignPayload {
    media_type: String,
    data_base64: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let catalog = match ProductCatalog::load_from_dir(&cli.catalog_dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(r#"{{"error": "Failed to load catalog: {}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Catalog => {
            let entries: Vec<_> = catalog
                .entries()
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "productType": entry.product_type,
                        "basePrice": entry.base_price,
                        "sizes": SizeLabel::all()
                            .iter()
                            .map(|label| serde_json::json!({
                                "label": label,
                                "preset": catalog.size_preset(*label),
                            }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&entries).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Quote { product_type, width, height } => {
            let product_type: ProductType = match product_type.parse() {
                Ok(p) => p,
                Err(e) => {
                    println!(r#"{{"error": "{}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };
            if !(width > 0.0 && height > 0.0) {
                println!(r#"{{"error": "Dimensions must be positive"}}"#);
                return ExitCode::FAILURE;
            }

            let quote = PriceQuote::compute(
                catalog.base_price(product_type),
                PhysicalSize::new(width, height),
            );
            println!("{}", serde_json::to_string_pretty(&quote).unwrap());
            ExitCode::SUCCESS
        }

        Commands::RenderSize { width, height, ppi } => {
            if !(width > 0.0 && height > 0.0 && ppi > 0.0) {
                println!(r#"{{"error": "Dimensions and ppi must be positive"}}"#);
                return ExitCode::FAILURE;
            }

            let render = PhysicalSize::new(width, height).to_render(Resolution::new(ppi));
            println!("{}", serde_json::to_string_pretty(&render).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Configure { payload, ppi } => {
            let request: ConfigureRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"success": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            match configure(&catalog, request, ppi) {
                Ok(output) => {
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e,
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2) // Validation failure
                }
            }
        }
    }
}

fn configure(
    catalog: &ProductCatalog,
    request: ConfigureRequest,
    ppi: f64,
) -> Result<serde_json::Value, String> {
    let mut session = ConfigSession::new(Resolution::new(ppi));
    session.select_type(request.product_type);
    session.select_color(request.color);
    session.select_size(request.size, catalog);

    if let Some(width) = request.width {
        session
            .set_dimension(Axis::Width, width)
            .map_err(|e| e.to_string())?;
    }
    if let Some(height) = request.height {
        session
            .set_dimension(Axis::Height, height)
            .map_err(|e| e.to_string())?;
    }

    let ticket = session
        .begin_upload(&request.design.media_type)
        .map_err(|e| e.to_string())?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&request.design.data_base64)
        .map_err(|e| format!("Invalid design data: {}", e))?;
    session.complete_upload(ticket, &request.design.media_type, &bytes);

    let mut cart = Cart::new();
    let artifact = session
        .finalize(catalog, &mut cart)
        .ok_or_else(|| "No design present; nothing to finalize".to_string())?;

    Ok(serde_json::json!({
        "success": true,
        "artifact": artifact,
        "cart": cart.list(),
        "mockup": catalog.mockup_asset(request.product_type, request.color),
    }))
}
