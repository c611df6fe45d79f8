use crate::core::models::chain::Chain;
use crate::core::models::configuration::Configuration;
use crate::core::models::placement::Placement;
use crate::core::utils::geometry::Extents;
use crate::engine::config::ConfigError;
use crate::engine::enumerator::DecodingStrategy;
use crate::engine::error::EngineError;
use crate::engine::grid::{Rejection, Validator};
use crate::engine::placement::Placer;
use tracing::{debug, instrument};

/// What to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectTarget {
    /// A step decoded with the given strategy.
    Step {
        step: u64,
        decoding: DecodingStrategy,
    },
    /// The orientations the chain was built with.
    RestingPose,
}

#[derive(Debug, Clone)]
pub struct Inspection {
    /// Strategy under which `configuration.step()` decodes to the placed pose.
    pub decoding: DecodingStrategy,
    pub configuration: Configuration,
    pub placement: Placement,
    pub verdict: Result<Extents, Rejection>,
}

impl Inspection {
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_ok()
    }
}

/// Places and validates a single configuration of `chain`.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn run(chain: &Chain, target: InspectTarget) -> Result<Inspection, EngineError> {
    let (decoding, configuration) = match target {
        InspectTarget::Step { step, decoding } => {
            if step >= chain.max_step() {
                return Err(ConfigError::InvalidRange {
                    start: step,
                    end: step.saturating_add(1),
                    reason: "step lies outside the configuration space",
                }
                .into());
            }
            (decoding, decoding.decode(chain, step))
        }
        InspectTarget::RestingPose => {
            let pose = chain.pose();
            // Per-corner steps cover every corner orientation of a valid chain.
            let step = DecodingStrategy::PerCorner
                .encode(chain, &pose)
                .unwrap_or_default();
            (DecodingStrategy::PerCorner, Configuration::new(step, pose))
        }
    };

    let placement = Placer::new().place(chain, &configuration);
    let verdict = Validator::for_chain(chain).validate(&placement);
    debug!(step = configuration.step(), ?verdict, "Inspected configuration.");

    Ok(Inspection {
        decoding,
        configuration,
        placement,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_step_zero_is_rejected_at_segment_five() {
        let inspection = run(
            &Chain::canonical(),
            InspectTarget::Step {
                step: 0,
                decoding: DecodingStrategy::PerChainIndex,
            },
        )
        .unwrap();
        assert!(!inspection.is_accepted());
        assert_eq!(
            inspection.verdict,
            Err(Rejection::SelfIntersection {
                segment: 5,
                cell: [0, 1, 0]
            })
        );
        assert_eq!(inspection.placement.len(), 27);
    }

    #[test]
    fn widest_per_corner_folding_is_a_long_rod() {
        let inspection = run(
            &Chain::canonical(),
            InspectTarget::Step {
                step: 572_662_292,
                decoding: DecodingStrategy::PerCorner,
            },
        )
        .unwrap();
        assert_eq!(inspection.verdict, Ok(Extents::new(1, 14, 2)));
        let cells: Vec<_> = inspection.placement.cells().collect();
        assert_eq!(cells[3], [-1, 2, 0]);
        assert_eq!(cells[26], [-1, 14, -1]);
    }

    #[test]
    fn true_cube_folding_fits_in_three_by_three() {
        let inspection = run(
            &Chain::canonical(),
            InspectTarget::Step {
                step: 816_956_659,
                decoding: DecodingStrategy::PerCorner,
            },
        )
        .unwrap();
        assert_eq!(inspection.verdict, Ok(Extents::cube(2)));
    }

    #[test]
    fn resting_pose_is_a_valid_folding() {
        let chain = Chain::canonical();
        let inspection = run(&chain, InspectTarget::RestingPose).unwrap();
        assert_eq!(inspection.decoding, DecodingStrategy::PerCorner);
        assert_eq!(inspection.configuration.step(), 960_051_513);
        assert_eq!(inspection.configuration.rotates(), chain.pose().as_slice());
        assert_eq!(inspection.verdict, Ok(Extents::new(6, 4, 2)));
    }

    #[test]
    fn step_past_the_space_is_rejected() {
        let chain = Chain::canonical();
        let err = run(
            &chain,
            InspectTarget::Step {
                step: chain.max_step(),
                decoding: DecodingStrategy::PerCorner,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::InvalidRange { .. })
        ));
    }
}
