//! Configuration Session - Single Entry Point
//!
//! A flat mutable configuration with ordering rules, not a phased state
//! machine. One writer (the UI event loop); the only suspension point is
//! design decoding, guarded by the upload generation counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cart::{CartItem, CartSink};
use crate::catalog::{ProductCatalog, ProductColor, ProductType, SizeLabel};
use crate::geometry::{
    self, DragDelta, PhysicalSize, PlacementOffset, RenderSize, Resolution,
};
use crate::pricing::PriceQuote;
use crate::upload::{self, DesignAsset, UploadError, UploadTicket};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "test-hooks")]
static STALE_DECODE_COUNT: AtomicU64 = AtomicU64::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_stale_decode_count() -> u64 {
    STALE_DECODE_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_stale_decode_count() {
    STALE_DECODE_COUNT.store(0, Ordering::SeqCst);
}

/// Garment selection. Replaced wholesale on user choice, never partially
/// mutated; the three axes are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    pub product_type: ProductType,
    pub color: ProductColor,
    pub size: SizeLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

#[derive(Debug, Error, PartialEq)]
pub enum DimensionError {
    #[error("Design dimensions must be positive numbers, got {0}")]
    Invalid(f64),
}

/// Result of delivering decoded bytes for an upload ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The ticket was the latest submission; the design was replaced.
    Applied,
    /// A newer upload superseded this ticket; the result was discarded.
    Stale,
}

/// Immutable snapshot of a finished customization. Ownership of the derived
/// cart item passes to the cart collaborator; the snapshot itself goes back
/// to the caller as the finalize signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationArtifact {
    pub id: Uuid,
    pub attributes: ProductAttributes,
    pub physical_size: PhysicalSize,
    pub base_price: f64,
    pub total_price: f64,
    pub design: DesignAsset,
    pub created_at: DateTime<Utc>,
}

impl ConfigurationArtifact {
    /// Derive the cart handoff record. Shares the artifact's identifier.
    pub fn to_cart_item(&self) -> CartItem {
        CartItem {
            id: self.id,
            name: format!("Custom {}", self.attributes.product_type),
            price: self.total_price,
            size: self.attributes.size,
            color: self.attributes.color,
            quantity: 1,
            image: self.design.data_url(),
        }
    }
}

/// The live configuration state. Created with defaults when the configurator
/// opens, mutated freely during the session, discarded on teardown.
pub struct ConfigSession {
    attributes: ProductAttributes,
    physical_size: PhysicalSize,
    offset: PlacementOffset,
    resolution: Resolution,
    design: Option<DesignAsset>,
    upload_generation: u64,
}

impl ConfigSession {
    /// Defaults: white t-shirt in M, 8x8 inch design area, centered, no
    /// design uploaded. The 8x8 starting size is a fixed default; size
    /// presets apply only when the user picks a size.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            attributes: ProductAttributes {
                product_type: ProductType::TShirt,
                color: ProductColor::White,
                size: SizeLabel::M,
            },
            physical_size: PhysicalSize::new(8.0, 8.0),
            offset: PlacementOffset::CENTERED,
            resolution,
            design: None,
            upload_generation: 0,
        }
    }

    pub fn attributes(&self) -> ProductAttributes {
        self.attributes
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.physical_size
    }

    pub fn offset(&self) -> PlacementOffset {
        self.offset
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn design(&self) -> Option<&DesignAsset> {
        self.design.as_ref()
    }

    /// Current design footprint in render space.
    pub fn render_size(&self) -> RenderSize {
        self.physical_size.to_render(self.resolution)
    }

    pub fn select_type(&mut self, product_type: ProductType) {
        self.attributes = ProductAttributes { product_type, ..self.attributes };
    }

    pub fn select_color(&mut self, color: ProductColor) {
        self.attributes = ProductAttributes { color, ..self.attributes };
    }

    /// Select a garment size. The size's preset dimensions always overwrite
    /// the current physical size, including manual edits.
    pub fn select_size(&mut self, size: SizeLabel, catalog: &ProductCatalog) {
        self.attributes = ProductAttributes { size, ..self.attributes };
        self.physical_size = catalog.size_preset(size);
    }

    /// Set one physical dimension. Non-positive or non-finite input is
    /// rejected and the prior value retained.
    pub fn set_dimension(&mut self, axis: Axis, value: f64) -> Result<(), DimensionError> {
        if !value.is_finite() || value <= 0.0 {
            warn!(?axis, value, "rejected dimension edit");
            return Err(DimensionError::Invalid(value));
        }
        match axis {
            Axis::Width => self.physical_size.width_in = value,
            Axis::Height => self.physical_size.height_in = value,
        }
        Ok(())
    }

    /// Submit an upload. The media-type filter runs here, synchronously; on
    /// acceptance the returned ticket marks this submission as the latest
    /// and any earlier in-flight decode as stale.
    pub fn begin_upload(&mut self, declared_media_type: &str) -> Result<UploadTicket, UploadError> {
        upload::validate_media_type(declared_media_type).map_err(|e| {
            warn!(declared_media_type, "rejected upload");
            e
        })?;
        self.upload_generation += 1;
        Ok(UploadTicket { generation: self.upload_generation })
    }

    /// Deliver the decoded bytes for an accepted upload. Only the latest
    /// ticket may mutate the design; stale results are silently discarded.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        media_type: &str,
        bytes: &[u8],
    ) -> UploadOutcome {
        if ticket.generation != self.upload_generation {
            #[cfg(feature = "test-hooks")]
            STALE_DECODE_COUNT.fetch_add(1, Ordering::SeqCst);

            debug!(
                stale = ticket.generation,
                latest = self.upload_generation,
                "discarded stale decode result"
            );
            return UploadOutcome::Stale;
        }

        let asset = DesignAsset::from_bytes(media_type, bytes);
        debug!(id = %asset.id, checksum = %asset.checksum, "design applied");
        self.design = Some(asset);
        self.offset = PlacementOffset::CENTERED;
        UploadOutcome::Applied
    }

    /// Apply a drag movement against the given mockup bounds. Always
    /// succeeds; the offset is clamped, never rejected. Calls are applied
    /// in the order received.
    pub fn drag(&mut self, delta: DragDelta, container: RenderSize) -> PlacementOffset {
        self.offset = geometry::apply_drag(self.offset, delta, container, self.render_size());
        self.offset
    }

    /// Re-clamp the placement after a geometry change (size edit, preset
    /// selection) without moving the design.
    pub fn constrain_placement(&mut self, container: RenderSize) -> PlacementOffset {
        self.offset = geometry::constrain(self.offset, container, self.render_size());
        self.offset
    }

    /// Live price for the current configuration.
    pub fn quote(&self, catalog: &ProductCatalog) -> PriceQuote {
        PriceQuote::compute(
            catalog.base_price(self.attributes.product_type),
            self.physical_size,
        )
    }

    /// Snapshot the configuration and hand the cart item to the sink.
    ///
    /// Precondition: a design must be present; without one this is a no-op
    /// returning `None` (no artifact, no handoff). The live session keeps
    /// existing afterwards; the artifact is a snapshot, not a view.
    pub fn finalize(
        &self,
        catalog: &ProductCatalog,
        cart: &mut dyn CartSink,
    ) -> Option<ConfigurationArtifact> {
        let design = self.design.clone()?;

        let quote = self.quote(catalog);
        let artifact = ConfigurationArtifact {
            id: Uuid::new_v4(),
            attributes: self.attributes,
            physical_size: self.physical_size,
            base_price: quote.base_price,
            total_price: quote.total,
            design,
            created_at: Utc::now(),
        };

        cart.add_item(artifact.to_cart_item());
        Some(artifact)
    }
}
