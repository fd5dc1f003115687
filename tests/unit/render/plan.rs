use std::sync::Arc;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::brand::color::derive_color;
use crate::layout::engine::LayoutEngine;

fn raster(w: u32, h: u32) -> Drawable {
    Drawable::Raster(PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![255; (w * h * 4) as usize]),
    })
}

fn ctx(framework: bool) -> RenderContext {
    RenderContext::new(
        raster(10, 10),
        raster(4, 2),
        framework.then(|| raster(2, 4)),
        derive_color("Acme"),
    )
}

#[test]
fn full_plan_has_fixed_z_order() {
    let layout = LayoutEngine::default().compute(500.0, 500.0);
    let plan = build_plan(&layout, ctx(true), &PlanOpts::default());
    assert_eq!(
        plan.layers(),
        vec![
            Layer::Background,
            Layer::BaseImage,
            Layer::AccentFill,
            Layer::AccentStroke,
            Layer::TopLeftCard,
            Layer::BottomRightCard,
            Layer::BrandIcon,
            Layer::FrameworkIcon,
        ]
    );
    assert_eq!(plan.layer_names()[0], "background");
}

#[test]
fn missing_framework_drops_only_the_badge_layer() {
    let layout = LayoutEngine::default().compute(500.0, 500.0);
    let with = build_plan(&layout, ctx(true), &PlanOpts::default());
    let without = build_plan(&layout, ctx(false), &PlanOpts::default());
    assert_eq!(without.len(), with.len() - 1);
    assert_eq!(without.layers()[..], with.layers()[..with.len() - 1]);
    assert!(!without.layers().contains(&Layer::FrameworkIcon));
}

#[test]
fn ops_use_layout_geometry_and_accent() {
    let layout = LayoutEngine::default().compute(300.0, 200.0);
    let plan = build_plan(&layout, ctx(true), &PlanOpts::default());

    match &plan.steps[1].op {
        DrawOp::Image { dst, .. } => assert_eq!(*dst, Rect::new(0.0, 0.0, 300.0, 200.0)),
        other => panic!("unexpected {other:?}"),
    }
    match &plan.steps[2].op {
        DrawOp::FillPath { color, .. } => {
            assert_eq!(*color, Rgba8Premul::from_straight_rgba(0x82, 0x2b, 0x33, 255))
        }
        other => panic!("unexpected {other:?}"),
    }
    match &plan.steps[4].op {
        DrawOp::FillRegion { region, color } => {
            assert_eq!(*region, layout.top_left_card);
            assert_eq!(*color, Rgba8Premul::white());
        }
        other => panic!("unexpected {other:?}"),
    }
    match &plan.steps[7].op {
        DrawOp::Image { dst, .. } => assert_eq!(*dst, layout.framework_slot.rect),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn zero_width_stroke_is_skipped() {
    let layout = LayoutEngine::default().compute(64.0, 64.0);
    let opts = PlanOpts {
        accent_stroke: StrokeStyle {
            width: 0.0,
            ..StrokeStyle::default()
        },
        ..PlanOpts::default()
    };
    let plan = build_plan(&layout, ctx(false), &opts);
    assert!(!plan.layers().contains(&Layer::AccentStroke));
}

#[test]
fn contain_fit_preserves_aspect_and_centers() {
    let slot = Rect::new(0.0, 0.0, 100.0, 50.0);
    let dst = IconFit::Contain.place(slot, (10.0, 10.0));
    assert_eq!(dst, Rect::new(25.0, 0.0, 75.0, 50.0));
    assert_eq!(IconFit::Stretch.place(slot, (10.0, 10.0)), slot);

    let empty = IconFit::Contain.place(Rect::new(0.0, 0.0, 0.0, 0.0), (10.0, 10.0));
    assert_eq!(empty.area(), 0.0);
}

#[test]
fn icon_fit_serde_names() {
    assert_eq!(
        serde_json::from_str::<IconFit>("\"contain\"").unwrap(),
        IconFit::Contain
    );
    assert_eq!(serde_json::to_string(&IconFit::Stretch).unwrap(), "\"stretch\"");
}
