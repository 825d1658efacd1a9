extern crate tracery;
#[macro_use]
extern crate bencher;

use tracery::extra::glyph::{build_glyph, GlyphOutline, OutlinePoint};
use tracery::extra::parser::parse_str;
use tracery::geom::euclid::Angle;
use tracery::math::point;
use tracery::path::traits::*;
use tracery::path::{BuilderOptions, Path, PathCommands};

use bencher::Bencher;

#[cfg(feature = "profiling")]
const N: usize = 100;
#[cfg(not(feature = "profiling"))]
const N: usize = 1;

fn build_lines(bench: &mut Bencher) {
    bench.iter(|| {
        let mut path = Path::new();
        for _ in 0..N {
            for i in 0..10 {
                path.move_to(point(0.0, i as f32)).unwrap();
                for j in 0..1_000 {
                    let x = (j + 1) as f32;
                    path.line_to(point(x, i as f32 + (j % 2) as f32)).unwrap();
                }
            }
        }

        let _ = path.build();
    });
}

fn build_quadratic_curves(bench: &mut Bencher) {
    bench.iter(|| {
        let mut path = Path::new();
        for _ in 0..N {
            for i in 0..10 {
                let y = i as f32 * 3.0;
                path.move_to(point(0.0, y)).unwrap();
                for j in 0..1_000 {
                    let x = j as f32 * 2.0;
                    path.quadratic_to(point(x + 1.0, y + 2.0), point(x + 2.0, y))
                        .unwrap();
                }
            }
        }

        let _ = path.build();
    });
}

fn build_arcs(bench: &mut Bencher) {
    bench.iter(|| {
        let mut path = Path::new();
        for _ in 0..N {
            for i in 0..10 {
                let y = i as f32 * 3.0;
                path.move_to(point(0.0, y)).unwrap();
                for j in 0..1_000 {
                    let x = (j + 1) as f32;
                    path.arc_to(point(x, y), Angle::radians(1.0)).unwrap();
                }
            }
        }

        let _ = path.build();
    });
}

fn build_mixed_with_more_steps(bench: &mut Bencher) {
    let options = BuilderOptions::DEFAULT
        .with_quadratic_steps(16)
        .with_arc_steps(64);

    bench.iter(|| {
        let mut path = Path::with_options(options);
        for _ in 0..N {
            for _ in 0..10 {
                path.move_to(point(0.0, 0.0)).unwrap();
                for _ in 0..1_000 {
                    path.line_to(point(1.0, 0.0)).unwrap();
                    path.quadratic_to(point(2.0, 0.0), point(2.0, 1.0)).unwrap();
                    path.arc_to(point(0.0, 0.0), Angle::radians(2.0)).unwrap();
                }
            }
        }

        let _ = path.build();
    });
}

fn glyph_outline() -> GlyphOutline {
    let mut outline = GlyphOutline::new();
    // A rounded square with implicit on-curve points on every side.
    for i in 0..100 {
        let o = i as f32 * 10.0;
        outline.add_contour(vec![
            OutlinePoint::control(point(o, o)),
            OutlinePoint::control(point(o + 100.0, o)),
            OutlinePoint::control(point(o + 100.0, o + 100.0)),
            OutlinePoint::on_curve(point(o + 50.0, o + 100.0)),
            OutlinePoint::control(point(o, o + 100.0)),
        ]);
    }

    outline
}

fn build_glyphs(bench: &mut Bencher) {
    let outline = glyph_outline();
    bench.iter(|| {
        for _ in 0..N {
            let _ = build_glyph(&outline, 0.01, &BuilderOptions::DEFAULT).unwrap();
        }
    });
}

fn parse_commands(bench: &mut Bencher) {
    let mut text = String::new();
    for i in 0..1_000 {
        text.push_str(&format!("M {} 0 L {} 1 Q 2 0 2 1 A 0 0 3.14 ", i, i));
    }

    bench.iter(|| {
        for _ in 0..N {
            let mut commands = PathCommands::new();
            parse_str(&text, &mut commands).unwrap();
        }
    });
}

benchmark_group!(builder,
    build_lines,
    build_quadratic_curves,
    build_arcs,
    build_mixed_with_more_steps,
);

benchmark_group!(extra,
    build_glyphs,
    parse_commands,
);

benchmark_main!(builder, extra);
