/// Input validation and class/color assignment.

use crate::error::ValidationError;
use crate::plot::palette::{palette_for, PaletteSource, RandomPalettes};
use crate::plot::types::{ClassOrder, Palette};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Anything usable as a class label.
pub trait ClassLabel: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> ClassLabel for T {}

/// Validated samples with display names and colors assigned per class.
///
/// `classes[i]` is shown as `names[i]` in color `palette[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest<L> {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<L>,
    pub text: Vec<String>,
    pub names: Vec<String>,
    pub palette: Palette,
    pub classes: Vec<L>,
}

impl<L: ClassLabel> PlotRequest<L> {
    pub fn sample_count(&self) -> usize {
        self.features.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Components per feature vector, 0 when there are no samples.
    pub fn dimension(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Sample indices of each class, in class order.
    pub fn partition(&self) -> Vec<Vec<usize>> {
        let slot: HashMap<&L, usize> = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class, i))
            .collect();
        let mut groups = vec![Vec::new(); self.classes.len()];
        for (idx, label) in self.labels.iter().enumerate() {
            if let Some(&i) = slot.get(label) {
                groups[i].push(idx);
            }
        }
        groups
    }
}

/// Distinct labels in the requested order.
pub fn distinct_classes<L: ClassLabel>(labels: &[L], order: ClassOrder) -> Vec<L> {
    match order {
        ClassOrder::FirstOccurrence => {
            let mut seen = HashSet::new();
            labels
                .iter()
                .filter(|label| seen.insert(*label))
                .cloned()
                .collect()
        }
        ClassOrder::Sorted => {
            let mut classes = labels.to_vec();
            classes.sort();
            classes.dedup();
            classes
        }
    }
}

/// Validate inputs with first-occurrence class order and freshly generated
/// fallback colors.
pub fn build_plot_request<L: ClassLabel>(
    features: Vec<Vec<f64>>,
    labels: Vec<L>,
    text: Option<Vec<String>>,
    names: Option<Vec<String>>,
) -> Result<PlotRequest<L>, ValidationError> {
    let mut source = RandomPalettes::new(rand::thread_rng());
    build_plot_request_with(
        features,
        labels,
        text,
        names,
        ClassOrder::default(),
        &mut source,
    )
}

/// Validate inputs, assign names and colors to classes.
///
/// `palettes` is only consulted when there are more classes than default
/// colors. Only `None` names are defaulted; an empty list must still match
/// the class count.
pub fn build_plot_request_with<L, S>(
    features: Vec<Vec<f64>>,
    labels: Vec<L>,
    text: Option<Vec<String>>,
    names: Option<Vec<String>>,
    order: ClassOrder,
    palettes: &mut S,
) -> Result<PlotRequest<L>, ValidationError>
where
    L: ClassLabel,
    S: PaletteSource + ?Sized,
{
    let n_samples = features.len();
    let text = text.unwrap_or_else(|| vec![String::new(); n_samples]);

    if labels.len() != n_samples || text.len() != n_samples {
        return Err(ValidationError::LengthMismatch {
            features: n_samples,
            labels: labels.len(),
            text: text.len(),
        });
    }
    check_shape(&features)?;

    let classes = distinct_classes(&labels, order);
    let names =
        names.unwrap_or_else(|| (0..classes.len()).map(|i| format!("class_{}", i)).collect());
    if names.len() != classes.len() {
        return Err(ValidationError::NameCountMismatch {
            classes: classes.len(),
            names: names.len(),
        });
    }

    let palette = palette_for(classes.len(), palettes);
    debug!(
        samples = n_samples,
        classes = classes.len(),
        ?order,
        "plot request validated"
    );

    Ok(PlotRequest {
        features,
        labels,
        text,
        names,
        palette,
        classes,
    })
}

/// Every vector must have the first vector's length and only finite values.
fn check_shape(features: &[Vec<f64>]) -> Result<(), ValidationError> {
    let Some(expected) = features.first().map(Vec::len) else {
        return Ok(());
    };
    for (index, row) in features.iter().enumerate() {
        if row.len() != expected {
            return Err(ValidationError::RaggedFeatures {
                index,
                expected,
                found: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::palette::PaletteCache;
    use crate::plot::types::DEFAULT_PALETTE;

    fn points(n: usize) -> Vec<Vec<f64>> {
        (0..n).map(|i| vec![i as f64, (i * 2) as f64]).collect()
    }

    #[test]
    fn test_defaults_filled() {
        let req = build_plot_request(points(4), vec![1, 2, 1, 3], None, None).unwrap();
        assert_eq!(req.sample_count(), 4);
        assert_eq!(req.text, vec![""; 4]);
        assert_eq!(req.names, vec!["class_0", "class_1", "class_2"]);
        assert_eq!(req.classes, vec![1, 2, 3]);
        assert_eq!(req.palette, DEFAULT_PALETTE[..3].to_vec());
        assert_eq!(req.dimension(), 2);
    }

    #[test]
    fn test_lengths_preserved() {
        let text: Vec<String> = (0..5).map(|i| format!("p{}", i)).collect();
        let req = build_plot_request(points(5), vec!["a"; 5], Some(text.clone()), None).unwrap();
        assert_eq!(req.features.len(), 5);
        assert_eq!(req.labels.len(), 5);
        assert_eq!(req.text, text);
    }

    #[test]
    fn test_label_count_mismatch() {
        let err = build_plot_request(points(5), vec![0; 4], None, None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                features: 5,
                labels: 4,
                text: 5
            }
        );
    }

    #[test]
    fn test_text_count_mismatch() {
        let err =
            build_plot_request(points(3), vec![0; 3], Some(vec![String::new()]), None).unwrap_err();
        assert!(matches!(err, ValidationError::LengthMismatch { text: 1, .. }));
    }

    #[test]
    fn test_name_count_mismatch() {
        let names = Some(vec!["only".to_string()]);
        let err = build_plot_request(points(3), vec![0, 1, 0], None, names).unwrap_err();
        assert_eq!(err, ValidationError::NameCountMismatch { classes: 2, names: 1 });
    }

    #[test]
    fn test_empty_names_are_not_defaulted() {
        let err = build_plot_request(points(3), vec![0, 1, 0], None, Some(Vec::new())).unwrap_err();
        assert_eq!(err, ValidationError::NameCountMismatch { classes: 2, names: 0 });

        let req = build_plot_request(Vec::new(), Vec::<u8>::new(), None, Some(Vec::new())).unwrap();
        assert!(req.names.is_empty());
    }

    #[test]
    fn test_ragged_features() {
        let features = vec![vec![0.0, 0.0], vec![1.0], vec![2.0, 2.0]];
        let err = build_plot_request(features, vec![0, 0, 0], None, None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RaggedFeatures {
                index: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_non_finite_features() {
        let features = vec![vec![0.0, 0.0], vec![f64::NAN, 1.0]];
        let err = build_plot_request(features, vec![0, 1], None, None).unwrap_err();
        assert_eq!(err, ValidationError::NonFinite { index: 1 });
    }

    #[test]
    fn test_empty_input() {
        let req = build_plot_request(Vec::new(), Vec::<u8>::new(), None, None).unwrap();
        assert_eq!(req.class_count(), 0);
        assert!(req.palette.is_empty());
        assert_eq!(req.dimension(), 0);
    }

    #[test]
    fn test_class_order() {
        let labels = vec![3, 1, 3, 2];
        assert_eq!(distinct_classes(&labels, ClassOrder::FirstOccurrence), vec![3, 1, 2]);
        assert_eq!(distinct_classes(&labels, ClassOrder::Sorted), vec![1, 2, 3]);
    }

    #[test]
    fn test_partition_follows_class_order() {
        let mut cache = PaletteCache::seeded(1, 0);
        let req = build_plot_request_with(
            points(5),
            vec!["b", "a", "b", "c", "a"],
            None,
            None,
            ClassOrder::Sorted,
            &mut cache,
        )
        .unwrap();
        assert_eq!(req.classes, vec!["a", "b", "c"]);
        assert_eq!(req.partition(), vec![vec![1, 4], vec![0, 2], vec![3]]);
    }

    #[test]
    fn test_many_classes_generate_palette() {
        let labels: Vec<u32> = (0..10).collect();
        let mut cache = PaletteCache::seeded(2, 5);
        let req = build_plot_request_with(
            points(10),
            labels,
            None,
            None,
            ClassOrder::FirstOccurrence,
            &mut cache,
        )
        .unwrap();
        assert_eq!(req.palette.len(), 10);
        assert_eq!(cache.peek(10), Some(&req.palette));
    }

    #[test]
    fn test_few_classes_leave_cache_untouched() {
        let mut cache = PaletteCache::seeded(2, 5);
        build_plot_request_with(
            points(7),
            (0..7).collect::<Vec<u32>>(),
            None,
            None,
            ClassOrder::FirstOccurrence,
            &mut cache,
        )
        .unwrap();
        assert!(cache.is_empty());
    }
}
