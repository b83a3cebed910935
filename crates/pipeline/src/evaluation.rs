use std::fmt;

use serde::{Deserialize, Serialize};
use swing_domain::Category;

/// A labeled prediction from a validation run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    pub truth: Category,
    pub predicted: Category,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassReport {
    pub category: Category,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Counts indexed `[truth][predicted]` in [`Category::ALL`] order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[usize; 4]; 4],
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ConfusionMatrix {
    pub fn from_predictions<'a>(predictions: impl IntoIterator<Item = &'a Prediction>) -> Self {
        let mut matrix = Self::default();
        for prediction in predictions {
            matrix.counts[prediction.truth.index()][prediction.predicted.index()] += 1;
        }
        matrix
    }

    pub fn count(&self, truth: Category, predicted: Category) -> usize {
        self.counts[truth.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let correct = (0..4).map(|i| self.counts[i][i]).sum();
        ratio(correct, self.total())
    }

    pub fn support(&self, category: Category) -> usize {
        self.counts[category.index()].iter().sum()
    }

    pub fn precision(&self, category: Category) -> f64 {
        let i = category.index();
        let predicted = (0..4).map(|truth| self.counts[truth][i]).sum();
        ratio(self.counts[i][i], predicted)
    }

    pub fn recall(&self, category: Category) -> f64 {
        let i = category.index();
        ratio(self.counts[i][i], self.support(category))
    }

    pub fn report(&self) -> Vec<ClassReport> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let precision = self.precision(category);
                let recall = self.recall(category);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassReport {
                    category,
                    precision,
                    recall,
                    f1,
                    support: self.support(category),
                }
            })
            .collect()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>16} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for line in self.report() {
            writeln!(
                f,
                "{:>16} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                line.category.as_str(),
                line.precision,
                line.recall,
                line.f1,
                line.support
            )?;
        }
        writeln!(f, "{:>16} {:>39.2}", "accuracy", self.accuracy())?;
        writeln!(f)?;
        write!(f, "{:>16}", "truth \\ pred")?;
        for category in Category::ALL {
            write!(f, " {:>9.9}", category.as_str())?;
        }
        writeln!(f)?;
        for truth in Category::ALL {
            write!(f, "{:>16}", truth.as_str())?;
            for predicted in Category::ALL {
                write!(f, " {:>9}", self.count(truth, predicted))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
