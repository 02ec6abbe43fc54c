#![allow(missing_docs)]
//! Host-level tests for the voxel-to-LED mapping primitives.

use cube_kit::cube::ChainConfig;
use cube_kit::cube::mapping::{FaceOwner, LedTarget, face_to_chain, serpentine_index, voxel_to_led};

fn chain(panels: u16, first_row_backwards: bool) -> ChainConfig {
    ChainConfig {
        pin: 0,
        panels,
        first_row_backwards,
    }
}

#[test]
fn face_ownership_is_contiguous_and_order_preserving() {
    let chains = [chain(3, false), chain(2, false)];
    for face in 0..3 {
        assert_eq!(
            face_to_chain(&chains, face),
            Some(FaceOwner {
                chain_index: 0,
                faces_before: 0
            })
        );
    }
    for face in 3..5 {
        assert_eq!(
            face_to_chain(&chains, face),
            Some(FaceOwner {
                chain_index: 1,
                faces_before: 3
            })
        );
    }
    assert_eq!(face_to_chain(&chains, 5), None);
}

#[test]
fn empty_chain_list_owns_nothing() {
    assert_eq!(face_to_chain(&[], 0), None);
}

#[test]
fn forward_rows_keep_column_order() {
    for x in 0..8 {
        assert_eq!(serpentine_index(x, 0, 8, false), x);
        assert_eq!(serpentine_index(x, 2, 8, false), 2 * 8 + x);
    }
}

#[test]
fn backwards_rows_reverse_column_order() {
    // The worked example: width 8, first row backwards, (x=3, y=0) → 4.
    assert_eq!(serpentine_index(3, 0, 8, true), 4);
    for x in 0..8 {
        assert_eq!(serpentine_index(x, 0, 8, true), 7 - x);
        assert_eq!(serpentine_index(x, 1, 8, true), 8 + x);
    }
}

#[test]
fn same_parity_rows_share_direction() {
    // Within a face, any two rows of equal parity run the same way.
    for first_row_backwards in [false, true] {
        for width in [4, 8] {
            for y1 in 0..8 {
                for y2 in 0..8 {
                    if y1 % 2 != y2 % 2 {
                        continue;
                    }
                    for x in 0..width {
                        let col1 = serpentine_index(x, y1, width, first_row_backwards) - y1 * width;
                        let col2 = serpentine_index(x, y2, width, first_row_backwards) - y2 * width;
                        assert_eq!(col1, col2);
                    }
                }
            }
        }
    }
}

#[test]
fn adjacent_rows_reverse_direction() {
    for first_row_backwards in [false, true] {
        for y in 0..7 {
            for x in 0..8 {
                let col_here = serpentine_index(x, y, 8, first_row_backwards) - y * 8;
                let col_next = serpentine_index(x, y + 1, 8, first_row_backwards) - (y + 1) * 8;
                assert_eq!(col_here, 7 - col_next);
            }
        }
    }
}

#[test]
fn every_face_maps_to_a_permutation_of_its_offsets() {
    let chains = [chain(2, false), chain(1, true)];
    let (width, height) = (8, 4);
    let face_pixels = width * height;

    for z in 0..3 {
        let mut seen = vec![false; face_pixels];
        let mut chain_of_face = None;
        for y in 0..height {
            for x in 0..width {
                let target =
                    voxel_to_led(&chains, x, y, z, width, height).expect("face is configured");
                // Every voxel of one face lands on one chain.
                assert_eq!(*chain_of_face.get_or_insert(target.chain_index), target.chain_index);
                let local = target.led_index % face_pixels;
                assert!(!seen[local], "physical offset mapped twice");
                seen[local] = true;
            }
        }
        assert!(seen.iter().all(|covered| *covered), "offset left unmapped");
    }
}

#[test]
fn chain_offsets_never_collide_across_faces() {
    let chains = [chain(2, false)];
    let (width, height) = (8, 8);
    let mut seen = vec![false; 2 * width * height];
    for z in 0..2 {
        for y in 0..height {
            for x in 0..width {
                let target =
                    voxel_to_led(&chains, x, y, z, width, height).expect("face is configured");
                assert_eq!(target.chain_index, 0);
                assert!(!seen[target.led_index], "LED index mapped twice");
                seen[target.led_index] = true;
            }
        }
    }
    assert!(seen.iter().all(|covered| *covered));
}

#[test]
fn worked_example_single_backwards_row() {
    // One chain, one 8×1 panel, first row backwards.
    let chains = [chain(1, true)];
    assert_eq!(
        voxel_to_led(&chains, 3, 0, 0, 8, 1),
        Some(LedTarget {
            chain_index: 0,
            led_index: 4
        })
    );
}

#[test]
fn second_face_starts_after_first_faces_pixels() {
    let chains = [chain(2, false)];
    let target = voxel_to_led(&chains, 0, 0, 1, 8, 8).expect("face is configured");
    assert_eq!(target.led_index, 64);
}

#[test]
fn face_beyond_total_is_unmapped() {
    let chains = [chain(1, false)];
    assert_eq!(voxel_to_led(&chains, 0, 0, 1, 8, 8), None);
}
