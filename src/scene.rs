use crate::steps::{ColorClass, DrawStep, StepRecorder, DEFAULT_CAPACITY};
use rand::Rng;

/// Visual width of the pot in columns
pub const POT_WIDTH: i32 = 31;

/// Initial branch energy of the trunk
pub const DEFAULT_LIFE: i32 = 35;

/// Rows between the bottom of the screen and the trunk's first segment
const TREE_ROOT_OFFSET: i32 = 6;

/// Pot pieces as (row offset, column offset, glyph, class, bold), in draw order
const POT: [(i32, i32, &str, ColorClass, bool); 10] = [
    // rim and dirt
    (0, 0, ":", ColorClass::Text, true),
    (0, 1, "___________", ColorClass::Leaf, false),
    (0, 12, "./~~~\\.", ColorClass::Wood, true),
    (0, 19, "___________", ColorClass::Leaf, false),
    (0, 30, ":", ColorClass::Text, true),
    // bowl
    (1, 0, " \\", ColorClass::Text, false),
    (1, 29, "/ ", ColorClass::Text, false),
    (2, 0, "  \\_________________________/", ColorClass::Text, false),
    // feet
    (3, 0, "  (_)", ColorClass::Text, false),
    (3, 26, "(_)", ColorClass::Text, false),
];

/// A generated pot and tree, ready to be replayed by the animator.
///
/// `steps[..base_end]` is the pot, `steps[base_end..]` the tree in growth order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    steps: Vec<DrawStep>,
    base_end: usize,
}

impl Scene {
    /// Generate a scene for a `rows x cols` screen with the default trunk energy
    pub fn generate<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Self {
        Self::generate_with(rows, cols, DEFAULT_LIFE, DEFAULT_CAPACITY, rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(
        rows: i32,
        cols: i32,
        life: i32,
        capacity: usize,
        rng: &mut R,
    ) -> Self {
        let mut recorder = StepRecorder::with_capacity(capacity);

        // The bottom row belongs to the countdown, so the pot sits on the row above it
        generate_base(&mut recorder, rows - 1, cols);
        let base_end = recorder.len();

        grow_tree(&mut recorder, rng, rows - TREE_ROOT_OFFSET, cols / 2, life);

        if recorder.dropped() > 0 {
            tracing::warn!(
                capacity,
                dropped = recorder.dropped(),
                "step capacity reached, tree truncated"
            );
        }

        Self {
            steps: recorder.into_steps(),
            base_end,
        }
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[DrawStep] {
        &self.steps
    }

    /// Index of the first tree step
    pub fn base_end(&self) -> usize {
        self.base_end
    }

    pub fn base(&self) -> &[DrawStep] {
        &self.steps[..self.base_end]
    }

    pub fn tree(&self) -> &[DrawStep] {
        &self.steps[self.base_end..]
    }

    pub fn tree_len(&self) -> usize {
        self.steps.len() - self.base_end
    }
}

/// Record the pot, centered on `cols`, with its feet on `reference_row - 1`
pub fn generate_base(recorder: &mut StepRecorder, reference_row: i32, cols: i32) {
    let start_x = cols / 2 - POT_WIDTH / 2;
    let top = reference_row - 4;

    for &(dy, dx, glyph, color, bold) in POT.iter() {
        recorder.record(top + dy, start_x + dx, glyph, color, bold);
    }
}

/// A branch segment waiting to be grown
struct BranchTask {
    row: i32,
    col: i32,
    life: i32,
}

/// Grow a tree from `(row, col)` with `life` energy.
///
/// Every segment has one guaranteed child and, while energy is above 5, a 20%
/// chance of a second one. Both children continue from the same next cell, so
/// popping them off the stack yields the same order as depth-first recursion.
pub fn grow_tree<R: Rng + ?Sized>(
    recorder: &mut StepRecorder,
    rng: &mut R,
    row: i32,
    col: i32,
    life: i32,
) {
    let mut stack: Vec<BranchTask> = Vec::with_capacity(64);
    stack.push(BranchTask { row, col, life });

    while let Some(task) = stack.pop() {
        if task.life <= 0 {
            continue;
        }
        if recorder.is_full() {
            break;
        }

        let (dx, dy) = get_deltas(rng);
        let (glyph, color, bold) = choose_glyph(rng, task.life, dx, dy);
        recorder.record(task.row, task.col, glyph, color, bold);

        let fork = rng.gen_range(0..10) > 7 && task.life > 5;

        let children = if fork { 2 } else { 1 };
        for _ in 0..children {
            stack.push(BranchTask {
                row: task.row + dy,
                col: task.col + dx,
                life: task.life - 1,
            });
        }
    }
}

/// Random step: any horizontal drift, upward 60% of the time
fn get_deltas<R: Rng + ?Sized>(rng: &mut R) -> (i32, i32) {
    let dx = rng.gen_range(-1..=1);
    let dy = if rng.gen_range(0..10) > 3 { -1 } else { 0 };
    (dx, dy)
}

fn choose_glyph<R: Rng + ?Sized>(
    rng: &mut R,
    life: i32,
    dx: i32,
    dy: i32,
) -> (&'static str, ColorClass, bool) {
    let glyph = if dy == 0 {
        "/~"
    } else if dx < 0 {
        "\\|"
    } else if dx == 0 {
        "/|\\"
    } else {
        "|/"
    };
    let bold = rng.gen_bool(0.5);

    if life < 4 {
        ("&", ColorClass::Leaf, true)
    } else {
        (glyph, ColorClass::Wood, bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn base_is_centered_and_ordered() {
        let mut rec = StepRecorder::new();
        generate_base(&mut rec, 39, 80);
        let steps = rec.steps();

        assert_eq!(steps.len(), POT.len());
        let start_x = steps[0].col;
        assert_eq!(start_x, 80 / 2 - 15);
        assert_eq!(start_x + 15, 40);
        assert_eq!(steps[0].row, 35);
        assert!(steps.windows(2).all(|w| w[0].row <= w[1].row));
        assert_eq!(steps.last().map(|s| s.row), Some(38));
    }

    #[test]
    fn base_glyphs_are_verbatim() {
        let mut rec = StepRecorder::new();
        generate_base(&mut rec, 20, 31);
        let glyphs: Vec<&str> = rec.steps().iter().map(|s| s.glyph.as_str()).collect();
        assert_eq!(
            glyphs,
            vec![
                ":",
                "___________",
                "./~~~\\.",
                "___________",
                ":",
                " \\",
                "/ ",
                "  \\_________________________/",
                "  (_)",
                "(_)",
            ]
        );
        assert_eq!(rec.steps()[4].col, 30);
        assert_eq!(rec.steps()[9].col, 26);
    }

    #[test]
    fn narrow_screen_yields_negative_columns() {
        let mut rec = StepRecorder::new();
        generate_base(&mut rec, 10, 10);
        assert_eq!(rec.steps()[0].col, 5 - 15);
        assert_eq!(rec.len(), POT.len());
    }

    #[test]
    fn tree_with_no_life_records_nothing() {
        for life in [-3, 0] {
            let mut rec = StepRecorder::new();
            grow_tree(&mut rec, &mut rng(1), 30, 40, life);
            assert!(rec.is_empty());
        }
    }

    #[test]
    fn tree_with_life_records_at_least_root() {
        for seed in 0..20 {
            let mut rec = StepRecorder::new();
            grow_tree(&mut rec, &mut rng(seed), 30, 40, 1);
            assert_eq!(rec.len(), 1);
            assert_eq!(rec.steps()[0].glyph, "&");
        }
    }

    #[test]
    fn tree_depth_is_bounded_by_life() {
        let life = 12;
        for seed in 0..50 {
            let mut rec = StepRecorder::new();
            grow_tree(&mut rec, &mut rng(seed), 100, 100, life);
            for step in rec.steps() {
                // each level moves at most one cell in each direction
                assert!(step.row <= 100 && step.row > 100 - life);
                assert!((step.col - 100).abs() < life);
            }
        }
    }

    #[test]
    fn tips_become_leaves() {
        let mut rec = StepRecorder::new();
        grow_tree(&mut rec, &mut rng(7), 40, 40, DEFAULT_LIFE);
        let steps = rec.steps();
        assert!(steps.len() >= DEFAULT_LIFE as usize);
        // the root always has full energy
        assert_eq!(steps[0].color, ColorClass::Wood);
        for step in steps.iter().filter(|s| s.color == ColorClass::Leaf) {
            assert_eq!(step.glyph, "&");
            assert!(step.emphasis);
        }
        assert!(steps.iter().any(|s| s.color == ColorClass::Leaf));
        for step in steps.iter().filter(|s| s.color == ColorClass::Wood) {
            assert!(["/~", "\\|", "/|\\", "|/"].contains(&step.glyph.as_str()));
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Scene::generate(40, 120, &mut rng(42));
        let b = Scene::generate(40, 120, &mut rng(42));
        assert_eq!(a.steps(), b.steps());
        assert_eq!(a.base_end(), b.base_end());
    }

    #[test]
    fn scene_splits_base_and_tree() {
        let scene = Scene::generate(40, 120, &mut rng(3));
        assert_eq!(scene.base_end(), POT.len());
        assert_eq!(scene.base().len() + scene.tree().len(), scene.steps().len());
        assert_eq!(scene.tree_len(), scene.tree().len());
        let root = &scene.tree()[0];
        assert_eq!((root.row, root.col), (40 - 6, 60));
    }

    #[test]
    fn truncation_keeps_indices_consistent() {
        // capacity inside the base
        let scene = Scene::generate_with(40, 80, DEFAULT_LIFE, 4, &mut rng(5));
        assert_eq!(scene.steps().len(), 4);
        assert_eq!(scene.base_end(), 4);
        assert_eq!(scene.tree_len(), 0);

        // capacity inside the tree
        let scene = Scene::generate_with(40, 80, DEFAULT_LIFE, 25, &mut rng(5));
        assert_eq!(scene.steps().len(), 25);
        assert_eq!(scene.base_end(), POT.len());
        assert_eq!(scene.tree_len(), 25 - POT.len());
    }
}
