//! CART Decision Tree
//!
//! Gini-impurity tree grown until leaves are pure (or a depth/size limit is
//! hit). Nodes live in a flat arena; index 0 is the root.

use fault_types::{FaultCategory, FaultSample, Measurement};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

type ClassCounts = [usize; FaultCategory::COUNT];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        counts: ClassCounts,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_features: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

/// Best split found for a node
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree over `rows` (indices into `samples`, duplicates allowed)
    pub(crate) fn fit<R: Rng>(
        samples: &[FaultSample],
        rows: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(samples, rows, 0, params, rng);
        tree
    }

    fn grow<R: Rng>(
        &mut self,
        samples: &[FaultSample],
        rows: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> usize {
        let counts = class_counts(samples, &rows);
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { counts });

        let depth_exhausted = params.max_depth.map_or(false, |max| depth >= max);
        if depth_exhausted || rows.len() < params.min_samples_split || gini(&counts) == 0.0 {
            return id;
        }

        let Some(split) = best_split(samples, &rows, params.max_features, rng) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| samples[r].features()[split.feature] <= split.threshold);

        let left = self.grow(samples, left_rows, depth + 1, params, rng);
        let right = self.grow(samples, right_rows, depth + 1, params, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Class distribution of the leaf the measurement falls into
    pub fn probabilities(&self, measurement: &Measurement) -> [f64; FaultCategory::COUNT] {
        let features = measurement.features();
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { counts } => return normalize(counts),
                // NaN compares false and falls to the right branch
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Most likely category for the measurement
    #[cfg(test)]
    pub fn predict(&self, measurement: &Measurement) -> FaultCategory {
        let idx = argmax(&self.probabilities(measurement));
        FaultCategory::from_index(idx).unwrap_or(FaultCategory::NoFault)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Longest root-to-leaf path (a single leaf has depth 0)
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, id: usize) -> usize {
        match &self.nodes[id] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + self.depth_from(*left).max(self.depth_from(*right)),
        }
    }
}

/// Search up to `max_features` non-constant features (in random order) for
/// the threshold with the lowest weighted gini impurity.
fn best_split<R: Rng>(
    samples: &[FaultSample],
    rows: &[usize],
    max_features: usize,
    rng: &mut R,
) -> Option<SplitCandidate> {
    let mut order: Vec<usize> = (0..Measurement::DIMENSION).collect();
    order.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    let mut visited = 0;

    for feature in order {
        if visited >= max_features {
            break;
        }

        let mut column: Vec<(f64, usize)> = rows
            .iter()
            .map(|&r| (samples[r].features()[feature], samples[r].label.index()))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        if column.first().map(|c| c.0) == column.last().map(|c| c.0) {
            continue;
        }
        visited += 1;

        let n = column.len();
        let mut total: ClassCounts = [0; FaultCategory::COUNT];
        for &(_, class) in &column {
            total[class] += 1;
        }

        let mut left: ClassCounts = [0; FaultCategory::COUNT];
        for i in 0..n - 1 {
            left[column[i].1] += 1;
            if column[i].0 == column[i + 1].0 {
                continue;
            }

            let mut right = total;
            for (r, l) in right.iter_mut().zip(left.iter()) {
                *r -= l;
            }

            let n_left = (i + 1) as f64;
            let n_right = (n - i - 1) as f64;
            let impurity = (n_left * gini(&left) + n_right * gini(&right)) / n as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: midpoint(column[i].0, column[i + 1].0),
                    impurity,
                });
            }
        }
    }

    best
}

fn class_counts(samples: &[FaultSample], rows: &[usize]) -> ClassCounts {
    let mut counts = [0; FaultCategory::COUNT];
    for &r in rows {
        counts[samples[r].label.index()] += 1;
    }
    counts
}

fn gini(counts: &ClassCounts) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Threshold between two adjacent distinct values; keeps `lo <= t < hi`
fn midpoint(lo: f64, hi: f64) -> f64 {
    let t = lo + (hi - lo) / 2.0;
    if t >= hi || !t.is_finite() {
        lo
    } else {
        t
    }
}

fn normalize(counts: &ClassCounts) -> [f64; FaultCategory::COUNT] {
    let total: usize = counts.iter().sum();
    let mut probs = [0.0; FaultCategory::COUNT];
    if total > 0 {
        for (p, &c) in probs.iter_mut().zip(counts.iter()) {
            *p = c as f64 / total as f64;
        }
    }
    probs
}

/// Index of the largest value, ties resolved to the lowest index
pub(crate) fn argmax(values: &[f64; FaultCategory::COUNT]) -> usize {
    let mut best = 0;
    for i in 1..values.len() {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}
