use crate::fault::FaultType;
use crate::image_classifier::error::ClassifierError;
use image::DynamicImage;

/// Result of classifying one image: the most likely fault type and the
/// probability of every fault type, most likely first.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub fault_type: FaultType,
    pub confidence: f32,
    pub distribution: Vec<(FaultType, f32)>,
}

impl Classification {
    /// Builds a classification from raw per-class model scores in
    /// `FaultType::ALL` order. Scores that do not already form a probability
    /// distribution are passed through softmax.
    pub fn from_scores(scores: &[f32]) -> Result<Self, ClassifierError> {
        if scores.len() != FaultType::ALL.len() {
            return Err(ClassifierError::Classification(format!(
                "expected {} class scores, got {}",
                FaultType::ALL.len(),
                scores.len()
            )));
        }
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ClassifierError::Classification(
                "model produced non-finite scores".to_string(),
            ));
        }

        let probabilities = if is_distribution(scores) {
            scores.to_vec()
        } else {
            softmax(scores)
        };

        let mut distribution: Vec<(FaultType, f32)> = probabilities
            .into_iter()
            .enumerate()
            .filter_map(|(index, p)| FaultType::from_index(index).map(|f| (f, p)))
            .collect();
        distribution.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (fault_type, confidence) = distribution[0];

        Ok(Self {
            fault_type,
            confidence,
            distribution,
        })
    }

    pub fn top_k(&self, k: usize) -> impl Iterator<Item = FaultType> + '_ {
        self.distribution.iter().take(k).map(|(fault_type, _)| *fault_type)
    }

    pub fn probability(&self, fault_type: FaultType) -> f32 {
        self.distribution
            .iter()
            .find(|(f, _)| *f == fault_type)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}

fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Image to fault-type capability. Output is deterministic for a fixed
/// image and model; failures are reported, never replaced by a default label.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scores_keeps_probabilities() {
        let mut scores = vec![0.0; 12];
        scores[5] = 0.7;
        scores[10] = 0.3;

        let c = Classification::from_scores(&scores).unwrap();
        assert_eq!(c.fault_type, FaultType::HotSpot);
        assert!((c.confidence - 0.7).abs() < 1e-6);
        assert_eq!(c.distribution.len(), 12);
        assert_eq!(c.distribution[1].0, FaultType::Soiling);
        assert!((c.probability(FaultType::Soiling) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn from_scores_applies_softmax_to_logits() {
        let mut scores = vec![-1.0; 12];
        scores[2] = 4.0;

        let c = Classification::from_scores(&scores).unwrap();
        assert_eq!(c.fault_type, FaultType::Cracking);
        let total: f32 = c.distribution.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(c.confidence > 0.9);
    }

    #[test]
    fn from_scores_rejects_wrong_length() {
        assert!(matches!(
            Classification::from_scores(&[0.5, 0.5]),
            Err(ClassifierError::Classification(_))
        ));
    }

    #[test]
    fn from_scores_rejects_nan() {
        let mut scores = vec![0.0; 12];
        scores[0] = f32::NAN;
        assert!(Classification::from_scores(&scores).is_err());
    }

    #[test]
    fn top_k_is_ordered_by_probability() {
        let scores: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let c = Classification::from_scores(&scores).unwrap();
        let top: Vec<FaultType> = c.top_k(3).collect();
        assert_eq!(
            top,
            vec![FaultType::Vegetation, FaultType::Soiling, FaultType::Shadowing]
        );
    }

    #[test]
    fn each_score_belongs_to_its_class_index() {
        // (i + 1) / 78 sums to 1, so the scores are used as given
        let scores: Vec<f32> = (0..12).map(|i| (i + 1) as f32 / 78.0).collect();
        let c = Classification::from_scores(&scores).unwrap();

        for (index, score) in scores.iter().enumerate() {
            let fault_type = FaultType::from_index(index).unwrap();
            assert!((c.probability(fault_type) - score).abs() < 1e-6, "{}", fault_type);
        }
        for fault_type in c.top_k(5) {
            assert!(c.probability(fault_type) >= c.probability(FaultType::Cell));
        }
    }
}
