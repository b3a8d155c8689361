//! Property checks for tiling, labeling and narrowing over many inputs
use e_mouse_grid::grid::{display_cells, NarrowResult, QuadrantRefiner, RefineOutcome};
use e_mouse_grid::labels::label_depth;
use e_mouse_grid::{build_grid, generate_labels, narrow, Alphabet, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn random_display(rng: &mut StdRng) -> Rect {
    Rect::new(
        rng.gen_range(-4000..4000) as f64,
        rng.gen_range(-2000..2000) as f64,
        rng.gen_range(1..3000) as f64,
        rng.gen_range(1..2000) as f64,
    )
}

#[test]
fn test_tiling_is_exact() {
    let mut rng = StdRng::seed_from_u64(0x6d67);
    for _ in 0..200 {
        let display = random_display(&mut rng);
        let cell_width = rng.gen_range(5..120) as f64;
        let cell_height = rng.gen_range(5..120) as f64;
        let cells = display_cells(&display, cell_width, cell_height);

        let cols = (display.width / cell_width).ceil() as usize;
        let rows = (display.height / cell_height).ceil() as usize;
        assert_eq!(cells.len(), cols * rows);

        // First column spans the full height, first row the full width
        let column_height: f64 = cells[..rows].iter().map(|c| c.height).sum();
        let row_width: f64 = cells.iter().step_by(rows).map(|c| c.width).sum();
        assert_eq!(column_height, display.height);
        assert_eq!(row_width, display.width);

        let area: f64 = cells.iter().map(|c| c.area()).sum();
        assert_eq!(area, display.area());

        // Neighbours share edges exactly
        for col in 0..cols {
            for row in 0..rows {
                let cell = cells[col * rows + row];
                if row + 1 < rows {
                    assert_eq!(cell.bottom(), cells[col * rows + row + 1].y);
                }
                if col + 1 < cols {
                    assert_eq!(cell.right(), cells[(col + 1) * rows + row].x);
                }
            }
        }
    }
}

#[test]
fn test_labels_minimal_and_unique() {
    for alphabet in ["ab", "abcd", "wesd", "fjruvndkeicmslwoxaqpzghtyb"] {
        let alphabet = Alphabet::new(alphabet).unwrap();
        for count in [1usize, 2, 3, 4, 5, 15, 16, 17, 63, 64, 65, 700] {
            let labels = generate_labels(&alphabet, count).unwrap();
            let depth = label_depth(alphabet.len(), count).unwrap();
            assert!(alphabet.len().pow(depth as u32) >= count);
            if depth > 1 {
                assert!(alphabet.len().pow(depth as u32 - 1) < count);
            }
            assert!(labels.iter().all(|l| l.chars().count() == depth));
            assert_eq!(labels.iter().collect::<HashSet<_>>().len(), count);
        }
    }
}

#[test]
fn test_every_label_resolves_to_its_cell() {
    let displays = [
        Rect::new(0.0, 0.0, 1280.0, 720.0),
        Rect::new(1280.0, -200.0, 800.0, 600.0),
    ];
    let alphabet = Alphabet::primary();
    let session = build_grid(&displays, 50.0, 40.0, &alphabet).unwrap();

    for original in session.cells() {
        let mut active = session.cells().to_vec();
        let mut resolved = None;
        for key in original.label.chars() {
            let before = active.len();
            match narrow(&active, key) {
                NarrowResult::Active(next) => {
                    assert!(next.len() <= before);
                    assert!(next
                        .iter()
                        .all(|c| c.label.len() + 1 == active[0].label.len()));
                    active = next;
                }
                NarrowResult::Resolved(cell) => {
                    resolved = Some(cell);
                    break;
                }
                NarrowResult::Rejected => panic!("label {} rejected", original.label),
            }
        }
        let cell = resolved.expect("full label resolves");
        assert_eq!(cell.rect(), original.rect());
    }
}

#[test]
fn test_random_refinement_respects_floor() {
    let refiner = QuadrantRefiner::new(Alphabet::quadrants(), 10.0, 10.0).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let mut session = refiner.enter(random_display(&mut rng));
        for _ in 0..40 {
            let key = ['w', 'e', 's', 'd'][rng.gen_range(0..4)];
            match refiner.refine(&mut session, key) {
                RefineOutcome::Refined(bounds) => {
                    assert!(bounds.width >= 10.0 && bounds.height >= 10.0);
                    let quadrant_area: f64 = session.cells().iter().map(|c| c.rect().area()).sum();
                    assert!((quadrant_area - bounds.area()).abs() < 1e-6 * bounds.area().max(1.0));
                }
                RefineOutcome::Rejected => panic!("quadrant key rejected"),
            }
        }
    }
}
