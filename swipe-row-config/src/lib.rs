//! KDL configuration for swipe rows.
//!
//! The document has two top-level sections, `row` for the geometry and `animations` for the
//! timing of the settle, commit and collapse phases. Every section and every field is optional.

use std::ffi::OsStr;
use std::path::Path;

use knuffel::errors::DecodeError;
use miette::{Context, IntoDiagnostic};
use tracing::debug;

mod animations;
mod row;

pub use animations::{
    Animation, AnimationPart, Animations, Curve, EasingParams, Kind, SpringParams, SpringPart,
};
pub use row::RowConfig;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub row: RowConfig,
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }
}

/// A float option that also accepts integer literals, range-checked on decode.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatOrInt<const MIN: i32, const MAX: i32>(pub f64);

impl<S: knuffel::traits::ErrorSpan, const MIN: i32, const MAX: i32> knuffel::DecodeScalar<S>
    for FloatOrInt<MIN, MAX>
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let range = f64::from(MIN)..=f64::from(MAX);

        let value: f64 = match &**val {
            knuffel::ast::Literal::Int(ref v) => match i32::try_from(v) {
                Ok(v) => f64::from(v),
                Err(err) => {
                    ctx.emit_error(DecodeError::conversion(val, err));
                    return Ok(Self::default());
                }
            },
            knuffel::ast::Literal::Decimal(ref v) => match f64::try_from(v) {
                Ok(v) => v,
                Err(err) => {
                    ctx.emit_error(DecodeError::conversion(val, err));
                    return Ok(Self::default());
                }
            },
            _ => {
                ctx.emit_error(DecodeError::scalar_kind(
                    knuffel::decode::Kind::Decimal,
                    val,
                ));
                return Ok(Self::default());
            }
        };

        if !range.contains(&value) {
            ctx.emit_error(DecodeError::conversion(
                val,
                format!("value must be between {MIN} and {MAX}"),
            ));
            return Ok(Self::default());
        }

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn parse_full_config() {
        let config = do_parse(
            r#"
            row {
                width 360
                height 64.5
                reveal-fraction 0.25
                rubber-band 0.01
            }

            animations {
                slowdown 2

                settle {
                    duration-ms 200
                    curve "ease-out-cubic"
                }

                commit {
                    spring damping-ratio=1 stiffness=800 epsilon=0.001
                }

                collapse {
                    off
                }
            }
            "#,
        );

        assert_eq!(
            config.row,
            RowConfig {
                width: FloatOrInt(360.),
                height: FloatOrInt(64.5),
                reveal_fraction: FloatOrInt(0.25),
                rubber_band: FloatOrInt(0.01),
            }
        );

        let animations = &config.animations;
        assert!(!animations.off);
        assert_eq!(animations.slowdown, FloatOrInt(2.));
        assert_eq!(
            animations.settle(),
            Animation {
                off: false,
                kind: Kind::Easing(EasingParams {
                    duration_ms: 200,
                    curve: Curve::EaseOutCubic,
                }),
            }
        );
        assert_eq!(
            animations.commit(),
            Animation {
                off: false,
                kind: Kind::Spring(SpringParams {
                    damping_ratio: 1.,
                    stiffness: 800,
                    epsilon: 0.001,
                }),
            }
        );
        assert!(animations.collapse().off);
    }

    #[test]
    fn partial_easing_keeps_default_curve() {
        let config = do_parse(
            r#"
            animations {
                settle {
                    duration-ms 150
                }
            }
            "#,
        );

        assert_eq!(
            config.animations.settle().kind,
            Kind::Easing(EasingParams {
                duration_ms: 150,
                curve: Curve::EaseInOutQuad,
            })
        );
    }

    #[test]
    fn easing_over_spring_default() {
        let config = do_parse(
            r#"
            animations {
                commit {
                    duration-ms 250
                    curve "linear"
                }
            }
            "#,
        );

        assert_eq!(
            config.animations.commit().kind,
            Kind::Easing(EasingParams {
                duration_ms: 250,
                curve: Curve::Linear,
            })
        );
    }

    #[test]
    fn global_off_disables_every_animation() {
        let config = do_parse("animations { off; }");
        assert!(config.animations.off);
        assert!(config.animations.settle().off);
        assert!(config.animations.commit().off);
        assert!(config.animations.collapse().off);
    }

    #[test]
    fn reject_out_of_range() {
        assert!(Config::parse("test.kdl", "row { reveal-fraction 1.5; }").is_err());
        assert!(Config::parse("test.kdl", "row { width -10; }").is_err());
    }

    #[test]
    fn reject_unknown_curve() {
        let text = r#"
            animations {
                settle {
                    curve "bounce"
                }
            }
        "#;
        assert!(Config::parse("test.kdl", text).is_err());
    }

    #[test]
    fn default_row_geometry() {
        insta::assert_debug_snapshot!(RowConfig::default(), @r"
        RowConfig {
            width: FloatOrInt(
                400.0,
            ),
            height: FloatOrInt(
                56.0,
            ),
            reveal_fraction: FloatOrInt(
                0.3,
            ),
            rubber_band: FloatOrInt(
                0.005,
            ),
        }
        ");
    }
}
