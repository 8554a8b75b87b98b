// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless tour of the effects engine: one stage, four cards, one light.
//!
//! This example drives a 2x2 card grid from a scripted pointer trace and
//! prints the render snapshots a host would paint each frame:
//! - per-card glow origin/intensity, tilt, magnetism offset, and scale,
//! - the shared ambient light's position and opacity.
//!
//! Run:
//! - `cargo run -p limelight_demos --example spotlight_grid`

use kurbo::{Point, Rect};
use limelight_card::{CardConfig, EffectFlags};
use limelight_glow::{Rgb, Viewport};
use limelight_spotlight::{CardId, SpotlightConfig};
use limelight_stage::Stage;

fn main() {
    let viewport = Viewport::new(1440.0, 900.0);
    let mut stage = Stage::new(SpotlightConfig::default(), viewport);
    stage.set_root(Some(Rect::new(0.0, 0.0, 900.0, 700.0)));

    // A 2x2 grid of 300x200 cards with a 100px gutter.
    let mut cards: Vec<(&str, CardId)> = Vec::new();
    for (name, rect) in [
        ("top-left", Rect::new(100.0, 100.0, 400.0, 300.0)),
        ("top-right", Rect::new(500.0, 100.0, 800.0, 300.0)),
        ("bottom-left", Rect::new(100.0, 400.0, 400.0, 600.0)),
        ("bottom-right", Rect::new(500.0, 400.0, 800.0, 600.0)),
    ] {
        let config = CardConfig {
            glow_color: Rgb(132, 0, 255),
            flags: EffectFlags::default(),
        };
        cards.push((name, stage.mount_card(rect, config)));
    }

    // Sweep the pointer from the gutter into the top-left card, click it,
    // then wander off the surface. Timestamps are milliseconds.
    let trace = [
        (Point::new(450.0, 350.0), 0_u64),
        (Point::new(380.0, 300.0), 160),
        (Point::new(300.0, 250.0), 320),
        (Point::new(250.0, 200.0), 480),
        (Point::new(-50.0, -50.0), 900),
    ];

    for (pointer, now) in trace {
        stage.on_pointer_move(pointer, now);
        stage.tick(now);
        println!("\n== pointer @ ({:.0}, {:.0}) t={now}ms ==", pointer.x, pointer.y);
        let light = stage.light_frame();
        println!(
            "light: pos=({:.1}, {:.1}) opacity={:.2} radius={:.0}",
            light.position.x, light.position.y, light.opacity, light.radius
        );
        for (name, id) in &cards {
            let frame = stage.card(*id).expect("card is mounted").frame();
            println!(
                "{name:>12}: glow={:.2} origin=({:.1}%, {:.1}%) tilt=({:+.1}, {:+.1}) offset=({:+.2}, {:+.2}) scale={:.3}",
                frame.glow_intensity,
                frame.glow_origin.0,
                frame.glow_origin.1,
                frame.tilt.0,
                frame.tilt.1,
                frame.magnet_offset.x,
                frame.magnet_offset.y,
                frame.scale,
            );
        }
    }

    // A click in the top-left card spawns a full-coverage ripple.
    let (_, top_left) = cards[0];
    stage.on_click(Point::new(150.0, 150.0), 1_000);
    for t in [1_000_u64, 1_375, 1_750] {
        stage.tick(t);
        let ripples: Vec<_> = stage
            .card(top_left)
            .expect("card is mounted")
            .ripples()
            .collect();
        println!("\n== t={t}ms: {} live ripple(s) ==", ripples.len());
        for r in ripples {
            println!(
                "ripple: center=({:.0}, {:.0}) radius={:.1} scale={:.2} opacity={:.2}",
                r.center.x, r.center.y, r.radius, r.scale, r.opacity
            );
        }
    }
}
