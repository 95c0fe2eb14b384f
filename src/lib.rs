//! StitchPress Core - Custom Garment Configurator
//!
//! # The Ground Rules (Non-Negotiable)
//! 1. Inches Drive Price
//! 2. Pixels Drive Preview
//! 3. Placement Is Clamped, Never Rejected
//! 4. Uploads Are Filtered At The Door
//! 5. Last Submitted Upload Wins
//! 6. Finalize Requires A Design

pub mod cart;
pub mod catalog;
pub mod geometry;
pub mod pricing;
pub mod session;
pub mod upload;

pub use cart::{Cart, CartItem, CartSink};
pub use catalog::{CatalogError, ProductCatalog, ProductColor, ProductType, SizeLabel};
pub use geometry::{apply_drag, DragDelta, PhysicalSize, PlacementOffset, RenderSize, Resolution};
pub use pricing::{price, PriceQuote, UNIT_PRINT_COST};
pub use session::{
    Axis, ConfigSession, ConfigurationArtifact, DimensionError, ProductAttributes, UploadOutcome,
};
pub use upload::{DesignAsset, UploadError, UploadTicket, ACCEPTED_MEDIA_TYPES};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
