use serde::{Deserialize, Serialize};

use super::BoostingParams;
use crate::fit::features::FeatureVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Single regression tree stored as a flat node arena; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Fit a tree to squared-error gradients (`prediction - label`) with unit hessians.
    pub(crate) fn grow(rows: &[FeatureVector], gradients: &[f64], params: &BoostingParams) -> Self {
        let mut grower = TreeGrower {
            rows,
            gradients,
            params,
            nodes: Vec::new(),
        };
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        grower.grow_node(&mut indices, 0);
        Self {
            nodes: grower.nodes,
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut cursor = 0;
        loop {
            match self.nodes.get(cursor) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    cursor = if value < *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], index: usize) -> usize {
            match nodes.get(index) {
                Some(TreeNode::Split { left, right, .. }) => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

struct TreeGrower<'a> {
    rows: &'a [FeatureVector],
    gradients: &'a [f64],
    params: &'a BoostingParams,
    nodes: Vec<TreeNode>,
}

impl TreeGrower<'_> {
    fn grow_node(&mut self, indices: &mut [usize], depth: usize) -> usize {
        let slot = self.nodes.len();
        self.nodes.push(TreeNode::Leaf { value: 0.0 });

        let gradient_sum: f64 = indices.iter().map(|&i| self.gradients[i]).sum();
        let hessian_sum = indices.len() as f64;

        let split = if depth < self.params.max_depth {
            self.best_split(indices, gradient_sum, hessian_sum)
        } else {
            None
        };

        match split {
            Some(candidate) => {
                let boundary = partition(indices, |&i| {
                    self.rows[i].as_slice()[candidate.feature] < candidate.threshold
                });
                let (left_rows, right_rows) = indices.split_at_mut(boundary);
                let left = self.grow_node(left_rows, depth + 1);
                let right = self.grow_node(right_rows, depth + 1);
                self.nodes[slot] = TreeNode::Split {
                    feature: candidate.feature,
                    threshold: candidate.threshold,
                    left,
                    right,
                };
            }
            None => {
                let weight = -gradient_sum / (hessian_sum + self.params.lambda);
                self.nodes[slot] = TreeNode::Leaf {
                    value: weight * self.params.learning_rate,
                };
            }
        }

        slot
    }

    fn best_split(
        &self,
        indices: &[usize],
        gradient_sum: f64,
        hessian_sum: f64,
    ) -> Option<SplitCandidate> {
        let lambda = self.params.lambda;
        let parent_score = gradient_sum * gradient_sum / (hessian_sum + lambda);
        let feature_count = indices
            .first()
            .map(|&i| self.rows[i].len())
            .unwrap_or(0);

        let mut best: Option<SplitCandidate> = None;
        let mut ordered = indices.to_vec();

        for feature in 0..feature_count {
            let value_of = |i: usize| self.rows[i].as_slice()[feature];
            ordered.sort_by(|&a, &b| value_of(a).total_cmp(&value_of(b)));

            let mut left_gradient = 0.0;
            let mut left_hessian = 0.0;
            for window in 0..ordered.len().saturating_sub(1) {
                let current = ordered[window];
                left_gradient += self.gradients[current];
                left_hessian += 1.0;

                let here = value_of(current);
                let next = value_of(ordered[window + 1]);
                if here == next {
                    continue;
                }

                let right_hessian = hessian_sum - left_hessian;
                if left_hessian < self.params.min_child_weight
                    || right_hessian < self.params.min_child_weight
                {
                    continue;
                }

                let right_gradient = gradient_sum - left_gradient;
                let gain = left_gradient * left_gradient / (left_hessian + lambda)
                    + right_gradient * right_gradient / (right_hessian + lambda)
                    - parent_score;

                if gain > MIN_SPLIT_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: here + (next - here) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }
}

const MIN_SPLIT_GAIN: f64 = 1e-12;

/// In-place partition returning the number of elements satisfying `predicate`.
fn partition<F>(items: &mut [usize], predicate: F) -> usize
where
    F: Fn(&usize) -> bool,
{
    let mut boundary = 0;
    for cursor in 0..items.len() {
        if predicate(&items[cursor]) {
            items.swap(boundary, cursor);
            boundary += 1;
        }
    }
    boundary
}
