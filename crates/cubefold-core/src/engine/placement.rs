use crate::core::models::chain::Chain;
use crate::core::models::configuration::Configuration;
use crate::core::models::placement::{PlacedSegment, Placement};
use crate::core::models::segment::ROTATE_STATES;
use crate::core::utils::geometry::{bend_rotation, forward};
use nalgebra::{Point3, Rotation3};

/// Turns orientation assignments into lattice positions.
///
/// The four corner rotations are computed once per placer and reused for
/// every configuration.
#[derive(Debug, Clone)]
pub struct Placer {
    bends: [Rotation3<f64>; ROTATE_STATES as usize],
}

impl Default for Placer {
    fn default() -> Self {
        Self::new()
    }
}

impl Placer {
    pub fn new() -> Self {
        Self {
            bends: std::array::from_fn(|rotate| bend_rotation(rotate as u8)),
        }
    }

    pub fn place(&self, chain: &Chain, config: &Configuration) -> Placement {
        let mut placement = Placement::with_capacity(chain.len());
        self.place_into(chain, config.rotates(), &mut placement);
        placement
    }

    /// Places `chain` with per-segment `rotates` into a reused buffer.
    ///
    /// Orientations missing from `rotates` count as 0.
    #[inline]
    pub fn place_into(&self, chain: &Chain, rotates: &[u8], placement: &mut Placement) {
        placement.clear();
        let mut position = Point3::origin();
        let mut orientation = Rotation3::identity();
        for (index, segment) in chain.segments().iter().enumerate() {
            if segment.kind.bends() {
                let rotate = rotates.get(index).copied().unwrap_or(0) % ROTATE_STATES;
                orientation *= self.bends[rotate as usize];
            }
            placement.push(PlacedSegment {
                position,
                orientation,
            });
            position += forward(&orientation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::segment::SegmentKind;

    fn cells(placement: &Placement) -> Vec<[i32; 3]> {
        placement.cells().collect()
    }

    #[test]
    fn straight_chain_runs_along_y() {
        let chain = Chain::with_corners(5, &[]).unwrap();
        let placement = Placer::new().place(&chain, &Configuration::new(0, vec![0; 5]));
        assert_eq!(
            cells(&placement),
            vec![[0, 0, 0], [0, 1, 0], [0, 2, 0], [0, 3, 0], [0, 4, 0]]
        );
    }

    #[test]
    fn corner_turns_before_its_own_position_is_recorded() {
        let chain = Chain::with_corners(8, &[1, 2, 3]).unwrap();
        let placement = Placer::new().place(&chain, &Configuration::new(0, vec![0; 8]));
        assert_eq!(
            &cells(&placement)[..5],
            &[[0, 0, 0], [0, 1, 0], [-1, 1, 0], [-1, 0, 0], [0, 0, 0]]
        );
    }

    #[test]
    fn each_rotate_sends_the_next_segment_a_different_way() {
        let chain = Chain::with_corners(4, &[1]).unwrap();
        let placer = Placer::new();
        let next_cells: Vec<_> = (0..4u8)
            .map(|rotate| {
                let placement =
                    placer.place(&chain, &Configuration::new(0, vec![0, rotate, 0, 0]));
                assert_eq!(placement.segments()[1].cell(), [0, 1, 0]);
                placement.segments()[2].cell()
            })
            .collect();
        assert_eq!(
            next_cells,
            vec![[-1, 1, 0], [0, 1, 1], [1, 1, 0], [0, 1, -1]]
        );
    }

    #[test]
    fn non_corner_segments_ignore_their_rotate() {
        let chain = Chain::with_corners(5, &[]).unwrap();
        let placer = Placer::new();
        let plain = placer.place(&chain, &Configuration::new(0, vec![0; 5]));
        let noisy = placer.place(&chain, &Configuration::new(0, vec![3; 5]));
        assert_eq!(cells(&plain), cells(&noisy));
    }

    #[test]
    fn every_step_is_a_unit_lattice_move() {
        let chain = Chain::canonical();
        let placement = Placer::new().place(&chain, &Configuration::new(0, chain.pose()));
        assert_eq!(placement.len(), chain.len());
        for pair in placement.segments().windows(2) {
            let delta = pair[1].position - pair[0].position;
            assert!((delta.norm() - 1.0).abs() < 1e-9);
            let snapped: i32 = pair[1]
                .cell()
                .iter()
                .zip(pair[0].cell())
                .map(|(a, b)| (a - b).abs())
                .sum();
            assert_eq!(snapped, 1);
        }
    }

    #[test]
    fn place_into_reuses_the_buffer() {
        let chain = Chain::from_kinds(&[
            SegmentKind::Endpoint,
            SegmentKind::Corner,
            SegmentKind::Straight,
            SegmentKind::Endpoint,
        ])
        .unwrap();
        let placer = Placer::new();
        let mut buffer = Placement::with_capacity(4);
        placer.place_into(&chain, &[0, 1, 0, 0], &mut buffer);
        let first = buffer.clone();
        placer.place_into(&chain, &[0, 1, 0, 0], &mut buffer);
        assert_eq!(buffer.len(), 4);
        assert_eq!(cells(&buffer), cells(&first));
    }
}
