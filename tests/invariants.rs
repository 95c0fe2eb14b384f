//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use proptest::prelude::*;

use stitchpress_core::{
    apply_drag, price, Axis, Cart, CartItem, CartSink, ConfigSession, DragDelta, PhysicalSize,
    PlacementOffset, ProductCatalog, ProductColor, ProductType, RenderSize, Resolution, SizeLabel,
    UploadOutcome, UNIT_PRINT_COST,
};

/// Records handoffs without storing them anywhere real.
#[derive(Default)]
struct RecordingSink {
    items: Vec<CartItem>,
}

impl CartSink for RecordingSink {
    fn add_item(&mut self, item: CartItem) {
        self.items.push(item);
    }
}

fn session_with_design() -> (ConfigSession, ProductCatalog) {
    let catalog = ProductCatalog::new();
    let mut session = ConfigSession::new(Resolution::new(96.0));
    let ticket = session.begin_upload("image/png").unwrap();
    session.complete_upload(ticket, "image/png", b"png bytes");
    (session, catalog)
}

#[test]
fn invariant_price_formula() {
    // t-shirt base 300, M preset 22x28
    assert_eq!(price(300.0, 22.0, 28.0), 300.0 + 22.0 * 28.0 * UNIT_PRINT_COST);
    assert_eq!(price(300.0, 22.0, 28.0), 916.0);
    assert_eq!(price(300.0, 10.0, 28.0), 580.0);
}

#[test]
fn invariant_end_to_end_tshirt_scenario() {
    let catalog = ProductCatalog::new();
    let mut session = ConfigSession::new(Resolution::new(300.0));
    session.select_size(SizeLabel::M, &catalog);
    assert_eq!(session.physical_size(), PhysicalSize::new(22.0, 28.0));
    assert_eq!(session.quote(&catalog).total, 916.0);

    session.set_dimension(Axis::Width, 10.0).unwrap();
    assert_eq!(session.quote(&catalog).total, 580.0);
}

#[test]
fn invariant_render_projection() {
    let render = PhysicalSize::new(8.0, 8.0).to_render(Resolution::new(300.0));
    assert_eq!(render, RenderSize::new(2400.0, 2400.0));
}

#[test]
fn invariant_size_preset_overwrites_manual_edits() {
    // Policy: choosing a size preset always resets physical dimensions,
    // including ones the user fine-tuned by hand.
    let catalog = ProductCatalog::new();
    let mut session = ConfigSession::new(Resolution::new(96.0));

    session.set_dimension(Axis::Width, 11.5).unwrap();
    session.set_dimension(Axis::Height, 9.0).unwrap();
    session.select_size(SizeLabel::Xl, &catalog);

    assert_eq!(session.attributes().size, SizeLabel::Xl);
    assert_eq!(session.physical_size(), PhysicalSize::new(26.0, 32.0));
}

#[test]
fn invariant_invalid_dimension_retains_prior_value() {
    let mut session = ConfigSession::new(Resolution::new(96.0));
    let before = session.physical_size();

    assert!(session.set_dimension(Axis::Width, 0.0).is_err());
    assert!(session.set_dimension(Axis::Width, -3.0).is_err());
    assert!(session.set_dimension(Axis::Height, f64::NAN).is_err());
    assert!(session.set_dimension(Axis::Height, f64::INFINITY).is_err());

    assert_eq!(session.physical_size(), before);
}

#[test]
fn invariant_attribute_axes_independent() {
    let catalog = ProductCatalog::new();
    let (mut session, _) = session_with_design();
    session.select_size(SizeLabel::L, &catalog);
    let size_before = session.physical_size();
    let offset_before = session.offset();

    session.select_type(ProductType::Hoodie);
    session.select_color(ProductColor::Black);

    // Type and color changes touch nothing else.
    assert_eq!(session.attributes().size, SizeLabel::L);
    assert_eq!(session.physical_size(), size_before);
    assert_eq!(session.offset(), offset_before);
    assert!(session.design().is_some());
}

#[test]
fn invariant_upload_filter_rejects_gif() {
    let mut session = ConfigSession::new(Resolution::new(96.0));
    let result = session.begin_upload("image/gif");
    assert!(result.is_err());
    assert!(session.design().is_none());

    let message = result.unwrap_err().to_string();
    assert!(message.contains("image/gif"));
}

#[test]
fn invariant_upload_png_applies_design() {
    let (session, _) = session_with_design();
    let design = session.design().expect("design present after decode");
    assert_eq!(design.media_type, "image/png");
    assert!(!design.data_base64.is_empty());
    assert!(!design.checksum.is_empty());
}

#[test]
fn invariant_upload_resets_offset_to_center() {
    let (mut session, _) = session_with_design();
    let container = RenderSize::new(4000.0, 5000.0);
    session.drag(DragDelta::new(50.0, 60.0), container);
    assert_ne!(session.offset(), PlacementOffset::CENTERED);

    let ticket = session.begin_upload("image/jpeg").unwrap();
    session.complete_upload(ticket, "image/jpeg", b"jpeg bytes");
    assert_eq!(session.offset(), PlacementOffset::CENTERED);
}

#[test]
fn invariant_last_submitted_upload_wins() {
    // Resolution order A then B.
    let mut session = ConfigSession::new(Resolution::new(96.0));
    let ticket_a = session.begin_upload("image/png").unwrap();
    let ticket_b = session.begin_upload("image/jpeg").unwrap();

    assert_eq!(session.complete_upload(ticket_a, "image/png", b"file A"), UploadOutcome::Stale);
    assert_eq!(session.complete_upload(ticket_b, "image/jpeg", b"file B"), UploadOutcome::Applied);
    assert_eq!(session.design().unwrap().media_type, "image/jpeg");

    // Resolution order B then A: the late A result must not clobber B.
    let mut session = ConfigSession::new(Resolution::new(96.0));
    let ticket_a = session.begin_upload("image/png").unwrap();
    let ticket_b = session.begin_upload("image/jpeg").unwrap();

    assert_eq!(session.complete_upload(ticket_b, "image/jpeg", b"file B"), UploadOutcome::Applied);
    let b_checksum = session.design().unwrap().checksum.clone();
    let offset_after_b = session.offset();

    assert_eq!(session.complete_upload(ticket_a, "image/png", b"file A"), UploadOutcome::Stale);
    assert_eq!(session.design().unwrap().checksum, b_checksum);
    assert_eq!(session.offset(), offset_after_b);
}

#[test]
fn invariant_finalize_requires_design() {
    let catalog = ProductCatalog::new();
    let session = ConfigSession::new(Resolution::new(96.0));
    let mut sink = RecordingSink::default();

    let artifact = session.finalize(&catalog, &mut sink);

    // No artifact, no handoff.
    assert!(artifact.is_none());
    assert!(sink.items.is_empty());
}

#[test]
fn invariant_finalize_snapshots_and_hands_off() {
    let (mut session, catalog) = session_with_design();
    session.select_type(ProductType::Hoodie);
    session.select_color(ProductColor::Black);
    session.select_size(SizeLabel::S, &catalog);

    let mut sink = RecordingSink::default();
    let artifact = session.finalize(&catalog, &mut sink).expect("artifact produced");

    assert_eq!(artifact.base_price, 600.0);
    assert_eq!(artifact.total_price, 600.0 + 20.0 * 26.0);

    let item = &sink.items[0];
    assert_eq!(item.id, artifact.id);
    assert_eq!(item.name, "Custom hoodie");
    assert_eq!(item.price, artifact.total_price);
    assert_eq!(item.size, SizeLabel::S);
    assert_eq!(item.color, ProductColor::Black);
    assert_eq!(item.quantity, 1);
    assert!(item.image.starts_with("data:image/png;base64,"));

    // The artifact is a snapshot: later edits do not reach into it.
    session.set_dimension(Axis::Width, 10.0).unwrap();
    assert_eq!(artifact.physical_size, PhysicalSize::new(20.0, 26.0));

    // The live session survives finalize and can finalize again.
    let second = session.finalize(&catalog, &mut sink).expect("second artifact");
    assert_ne!(second.id, artifact.id);
    assert_eq!(sink.items.len(), 2);
}

#[test]
fn invariant_cart_list_and_remove() {
    let (session, catalog) = session_with_design();
    let mut cart = Cart::new();
    let artifact = session.finalize(&catalog, &mut cart).unwrap();

    assert_eq!(cart.list().len(), 1);
    let removed = cart.remove(artifact.id).expect("item removed");
    assert_eq!(removed.id, artifact.id);
    assert!(cart.list().is_empty());
    assert!(cart.remove(artifact.id).is_none());
}

#[test]
fn invariant_mockup_asset_naming() {
    let catalog = ProductCatalog::new();
    assert_eq!(catalog.mockup_asset(ProductType::Hoodie, ProductColor::White), "hoodie-white");
    assert_eq!(catalog.mockup_asset(ProductType::TShirt, ProductColor::Black), "t-shirt-black");
}

#[test]
fn invariant_catalog_overrides_from_dir() {
    use std::fs;

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("hoodie.json"),
        r#"{"productType": "hoodie", "basePrice": 750.0}"#,
    )
    .unwrap();

    let catalog = ProductCatalog::load_from_dir(dir.path()).unwrap();
    assert_eq!(catalog.base_price(ProductType::Hoodie), 750.0);
    // Untouched entries keep their defaults.
    assert_eq!(catalog.base_price(ProductType::TShirt), 300.0);
}

#[test]
fn invariant_drag_order_is_cumulative() {
    let (mut session, _) = session_with_design();
    let container = RenderSize::new(4000.0, 5000.0);

    session.drag(DragDelta::new(30.0, 0.0), container);
    let offset = session.drag(DragDelta::new(-10.0, 25.0), container);
    assert_eq!(offset, PlacementOffset::new(20.0, 25.0));
}

#[test]
fn invariant_placement_reclamped_after_size_change() {
    let catalog = ProductCatalog::new();
    let (mut session, _) = session_with_design();
    // 8x8 in at 96 ppi = 768x768 px content in a 1000x1000 px mockup.
    let container = RenderSize::new(1000.0, 1000.0);
    session.drag(DragDelta::new(1000.0, 0.0), container);
    assert_eq!(session.offset().x, 116.0);

    // XS preset (18x24 in) makes the content larger than the mockup; the
    // stale offset must shrink back into the new reachable range.
    session.select_size(SizeLabel::Xs, &catalog);
    let offset = session.constrain_placement(container);
    let reach_x: f64 = (18.0 * 96.0 - 1000.0) / 2.0;
    assert_eq!(offset.x, reach_x.min(116.0));
}

proptest! {
    #[test]
    fn prop_price_matches_formula(
        base in 0.0f64..10_000.0,
        w in 0.01f64..100.0,
        h in 0.01f64..100.0,
    ) {
        prop_assert_eq!(price(base, w, h), base + w * h * UNIT_PRINT_COST);
    }

    #[test]
    fn prop_price_monotone_in_each_dimension(
        base in 0.0f64..10_000.0,
        w in 0.01f64..100.0,
        h in 0.01f64..100.0,
        grow in 0.0f64..50.0,
    ) {
        prop_assert!(price(base, w + grow, h) >= price(base, w, h));
        prop_assert!(price(base, w, h + grow) >= price(base, w, h));
    }

    #[test]
    fn prop_render_size_linear_in_resolution(
        w in 0.01f64..100.0,
        h in 0.01f64..100.0,
        r1 in 1.0f64..1200.0,
        r2 in 1.0f64..1200.0,
    ) {
        let size = PhysicalSize::new(w, h);
        let a = size.to_render(Resolution::new(r1));
        let b = size.to_render(Resolution::new(r2));
        prop_assert!((a.width_px / b.width_px - r1 / r2).abs() < 1e-9);
        prop_assert!((a.height_px / b.height_px - r1 / r2).abs() < 1e-9);
    }

    #[test]
    fn prop_drag_keeps_content_inside_container(
        cw in 1.0f64..2000.0,
        ch in 1.0f64..2000.0,
        // Content no larger than the container on either axis.
        fw in 0.01f64..=1.0,
        fh in 0.01f64..=1.0,
        x0 in -3000.0f64..3000.0,
        y0 in -3000.0f64..3000.0,
        dx in -1e6f64..1e6,
        dy in -1e6f64..1e6,
    ) {
        let container = RenderSize::new(cw, ch);
        let content = RenderSize::new(cw * fw, ch * fh);
        let out = apply_drag(
            PlacementOffset::new(x0, y0),
            DragDelta::new(dx, dy),
            container,
            content,
        );

        // Center anchor: the translated bounding box must stay inside the
        // container's bounding box.
        let eps = 1e-9;
        prop_assert!(out.x - content.width_px / 2.0 >= -cw / 2.0 - eps);
        prop_assert!(out.x + content.width_px / 2.0 <= cw / 2.0 + eps);
        prop_assert!(out.y - content.height_px / 2.0 >= -ch / 2.0 - eps);
        prop_assert!(out.y + content.height_px / 2.0 <= ch / 2.0 + eps);
    }

    #[test]
    fn prop_oversize_drag_keeps_container_covered(
        cw in 1.0f64..2000.0,
        ch in 1.0f64..2000.0,
        // Content strictly larger than the container on both axes.
        fw in 1.0f64..4.0,
        fh in 1.0f64..4.0,
        dx in -1e6f64..1e6,
        dy in -1e6f64..1e6,
    ) {
        let container = RenderSize::new(cw, ch);
        let content = RenderSize::new(cw * fw, ch * fh);
        let out = apply_drag(
            PlacementOffset::CENTERED,
            DragDelta::new(dx, dy),
            container,
            content,
        );

        // The container's bounding box stays fully covered by the content.
        let eps = 1e-9;
        prop_assert!(out.x - content.width_px / 2.0 <= -cw / 2.0 + eps);
        prop_assert!(out.x + content.width_px / 2.0 >= cw / 2.0 - eps);
        prop_assert!(out.y - content.height_px / 2.0 <= -ch / 2.0 + eps);
        prop_assert!(out.y + content.height_px / 2.0 >= ch / 2.0 - eps);
    }
}
