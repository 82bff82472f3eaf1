//! Validation of the untyped report mapping into typed report models.
//!
//! The input is the nested mapping a classification-report generator emits
//! with `output_dict` semantics: class labels plus `"accuracy"`,
//! `"macro avg"`, `"weighted avg"` keys. Validation is fail-fast and happens
//! entirely before any cell is written.

use serde_json::{Map, Value};

use crate::conf::{KEY_ACCURACY, KEY_MACRO_AVG, KEY_MICRO_AVG, KEY_WEIGHTED_AVG, TUP_METRIC_KEYS};
use crate::spec::{
    EnumAccuracyEntry, ReportConvertError, SpecClassificationReport, SpecMetricRow,
};

/// Convert an untyped report mapping into a validated [`SpecClassificationReport`].
///
/// Class rows are sorted lexicographically by label, independent of input
/// iteration order. `"micro avg"` is accepted in place of `"accuracy"`.
pub fn convert_value_to_report(
    value: &Value,
) -> Result<SpecClassificationReport, ReportConvertError> {
    let Some(dict_report) = value.as_object() else {
        return Err(ReportConvertError::RootNotMapping);
    };

    let mut l_rows_class = Vec::new();
    let mut accuracy_scalar = None;
    let mut row_micro_avg = None;
    let mut row_macro_avg = None;
    let mut row_weighted_avg = None;

    for (c_label, entry) in dict_report {
        match c_label.as_str() {
            KEY_ACCURACY => {
                let Some(n_accuracy) = entry.as_f64() else {
                    return Err(ReportConvertError::AccuracyNotNumeric);
                };
                accuracy_scalar = Some(n_accuracy);
            }
            KEY_MICRO_AVG => row_micro_avg = Some(parse_metric_row(c_label, entry)?),
            KEY_MACRO_AVG => row_macro_avg = Some(parse_metric_row(c_label, entry)?),
            KEY_WEIGHTED_AVG => row_weighted_avg = Some(parse_metric_row(c_label, entry)?),
            _ => l_rows_class.push(parse_metric_row(c_label, entry)?),
        }
    }

    l_rows_class.sort_by(|row_a, row_b| row_a.label.cmp(&row_b.label));

    let accuracy = match (accuracy_scalar, row_micro_avg) {
        (Some(n_accuracy), _) => EnumAccuracyEntry::Scalar(n_accuracy),
        (None, Some(row)) => EnumAccuracyEntry::MicroAvg(row),
        (None, None) => {
            return Err(ReportConvertError::MissingAggregate {
                label: KEY_ACCURACY.to_string(),
            });
        }
    };

    let Some(row_macro_avg) = row_macro_avg else {
        return Err(ReportConvertError::MissingAggregate {
            label: KEY_MACRO_AVG.to_string(),
        });
    };
    let Some(row_weighted_avg) = row_weighted_avg else {
        return Err(ReportConvertError::MissingAggregate {
            label: KEY_WEIGHTED_AVG.to_string(),
        });
    };

    Ok(SpecClassificationReport {
        rows_class: l_rows_class,
        accuracy,
        row_macro_avg,
        row_weighted_avg,
    })
}

fn parse_metric_row(label: &str, entry: &Value) -> Result<SpecMetricRow, ReportConvertError> {
    let Some(dict_entry) = entry.as_object() else {
        return Err(ReportConvertError::EntryNotMapping {
            label: label.to_string(),
        });
    };

    let mut l_values = [0f64; 4];
    for (n_idx, key) in TUP_METRIC_KEYS.iter().enumerate() {
        l_values[n_idx] = select_metric(label, dict_entry, key)?;
    }
    let [precision, recall, f1_score, support] = l_values;

    Ok(SpecMetricRow {
        label: label.to_string(),
        precision,
        recall,
        f1_score,
        support,
    })
}

fn select_metric(
    label: &str,
    dict_entry: &Map<String, Value>,
    key: &'static str,
) -> Result<f64, ReportConvertError> {
    let Some(value) = dict_entry.get(key) else {
        return Err(ReportConvertError::MissingMetricKey {
            label: label.to_string(),
            key,
        });
    };
    value
        .as_f64()
        .ok_or_else(|| ReportConvertError::MetricNotNumeric {
            label: label.to_string(),
            key,
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn report_value() -> Value {
        json!({
            "dog": {"precision": 0.5, "recall": 0.5, "f1-score": 0.5, "support": 2},
            "cat": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
            "accuracy": 0.75,
            "macro avg": {"precision": 0.75, "recall": 0.75, "f1-score": 0.75, "support": 4},
            "weighted avg": {"precision": 0.75, "recall": 0.75, "f1-score": 0.75, "support": 4},
        })
    }

    #[test]
    fn well_formed_report_parses_with_sorted_class_rows() {
        let report = convert_value_to_report(&report_value()).unwrap();

        let l_labels: Vec<&str> = report
            .rows_class
            .iter()
            .map(|row| row.label.as_str())
            .collect();
        assert_eq!(l_labels, vec!["cat", "dog"]);
        assert_eq!(report.accuracy, EnumAccuracyEntry::Scalar(0.75));
        assert_eq!(report.row_macro_avg.f1_score, 0.75);
        assert_eq!(report.row_weighted_avg.support, 4.0);
        assert_eq!(report.row_count_total(), 6);
    }

    #[test]
    fn missing_metric_key_names_label_and_key() {
        let value = json!({
            "cat": {"precision": 1.0},
            "accuracy": 0.75,
            "macro avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
            "weighted avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
        });

        assert!(matches!(
            convert_value_to_report(&value),
            Err(ReportConvertError::MissingMetricKey { label, key: "recall" }) if label == "cat"
        ));
    }

    #[test]
    fn non_numeric_metric_is_rejected() {
        let value = json!({
            "cat": {"precision": 1.0, "recall": "high", "f1-score": 1.0, "support": 2},
            "accuracy": 0.75,
            "macro avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
            "weighted avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
        });

        assert!(matches!(
            convert_value_to_report(&value),
            Err(ReportConvertError::MetricNotNumeric { label, key: "recall" }) if label == "cat"
        ));
    }

    #[test]
    fn accuracy_must_be_a_bare_number() {
        let value = json!({
            "accuracy": {"precision": 1.0},
            "macro avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
            "weighted avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
        });

        assert!(matches!(
            convert_value_to_report(&value),
            Err(ReportConvertError::AccuracyNotNumeric)
        ));
    }

    #[test]
    fn micro_avg_is_accepted_in_place_of_accuracy() {
        let value = json!({
            "cat": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
            "micro avg": {"precision": 0.8, "recall": 0.8, "f1-score": 0.8, "support": 2},
            "macro avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
            "weighted avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
        });

        let report = convert_value_to_report(&value).unwrap();
        assert!(matches!(
            report.accuracy,
            EnumAccuracyEntry::MicroAvg(ref row) if row.label == "micro avg"
        ));
    }

    #[test]
    fn missing_aggregates_are_rejected() {
        let value = json!({
            "cat": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
        });
        assert!(matches!(
            convert_value_to_report(&value),
            Err(ReportConvertError::MissingAggregate { label }) if label == "accuracy"
        ));

        let value = json!({
            "accuracy": 0.75,
            "weighted avg": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
        });
        assert!(matches!(
            convert_value_to_report(&value),
            Err(ReportConvertError::MissingAggregate { label }) if label == "macro avg"
        ));
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        assert!(matches!(
            convert_value_to_report(&json!([1, 2, 3])),
            Err(ReportConvertError::RootNotMapping)
        ));
    }
}
