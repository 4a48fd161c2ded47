use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SegmentPrediction {
    pub segment: u32,
    pub prediction: String,
    #[serde(default)]
    pub probabilities: HashMap<String, f64>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FinalPrediction {
    #[serde(rename = "class")]
    pub class_name: String,
    /// Percentage of segments voting for `class_name`
    pub confidence: f64,
    #[serde(default)]
    pub distribution: HashMap<String, u32>,
    #[serde(default)]
    pub average_probabilities: HashMap<String, f64>,
}

/// Classification returned by the ECG upload endpoint
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct EcgAnalysis {
    /// Base64 PNG of the denoised signal
    #[serde(default)]
    pub signal_plot: Option<String>,
    #[serde(default)]
    pub predictions: Vec<SegmentPrediction>,
    pub final_prediction: FinalPrediction,
}

impl EcgAnalysis {
    /// Classes by average probability, highest first
    pub fn ranked_classes(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .final_prediction
            .average_probabilities
            .iter()
            .map(|(class, p)| (class.clone(), *p))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_summary_and_ranks_classes() {
        let json = r#"{
            "signal_plot": null,
            "predictions": [{"segment": 1, "prediction": "Normal", "probabilities": {"Normal": 0.9, "PVC": 0.1}}],
            "final_prediction": {
                "class": "Normal",
                "confidence": 100.0,
                "distribution": {"Normal": 1},
                "average_probabilities": {"Normal": 0.9, "PVC": 0.1}
            }
        }"#;
        let analysis: EcgAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.final_prediction.class_name, "Normal");
        let ranked = analysis.ranked_classes();
        assert_eq!(ranked[0].0, "Normal");
        assert_eq!(ranked[1].0, "PVC");
    }
}
