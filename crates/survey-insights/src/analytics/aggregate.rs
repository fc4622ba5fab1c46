use super::segments::Segment;
use super::views::{
    DimensionScores, Distribution, DistributionEntry, GlobalKpis, LevelCount, Opportunity,
    ProblemRankingEntry, ProcessLevelRow, ScoreBand, ScoreBandEntry, ScoreBands, ScoreTableRow,
    VisibilityShare,
};
use crate::pipeline::BusinessRecord;
use crate::scoring::{ScoreCard, ScoreKind};
use crate::survey::catalog::{keys, PROBLEM_FREQUENCIES, PROCESS_LEVELS};
use crate::survey::FieldValue;
use std::collections::BTreeMap;

pub const HIGH_RISK_THRESHOLD: u8 = 70;
pub const TECH_READY_THRESHOLD: u8 = 60;

const LOW_VISIBILITY: [&str; 2] = ["No aparecemos", "Solo redes sociales basicas"];

const PROBLEM_INDICATORS: [(&str, &str); 5] = [
    (keys::PROBLEMAS_RESERVAS_DUPLICADAS, "Duplicate reservations"),
    (keys::PROBLEMAS_INVENTARIO, "Missing inventory control"),
    (keys::PROBLEMAS_ADMINISTRACION, "Too much administrative time"),
    (keys::PROBLEMAS_FALTA_INFO, "Missing information"),
    (keys::PROBLEMAS_DATOS_DISPERSOS, "Data scattered across places"),
];

/// Counts occurrences of each catalog option. Values outside the catalog are not counted.
pub fn distribution(records: &[BusinessRecord], field: &str, options: &[String]) -> Distribution {
    let mut counts = vec![0usize; options.len()];
    let mut bump = |value: &str| {
        if let Some(index) = options.iter().position(|option| option == value) {
            counts[index] += 1;
        }
    };

    for record in records {
        match record.answer(field) {
            FieldValue::Choice(value) | FieldValue::Cell(value) => bump(value.as_str()),
            FieldValue::Choices(items) => items.iter().for_each(|item| bump(item.as_str())),
            FieldValue::Level(level) => bump(level.to_string().as_str()),
            FieldValue::Missing => {}
        }
    }

    Distribution {
        field: field.to_string(),
        entries: options
            .iter()
            .zip(counts)
            .map(|(option, count)| DistributionEntry {
                option: option.clone(),
                count,
            })
            .collect(),
    }
}

/// Rounded average of one score per value of a single-valued field.
pub fn average_by_dimension(
    records: &[BusinessRecord],
    group_field: &str,
    score: ScoreKind,
) -> BTreeMap<String, u8> {
    group_by(records, group_field)
        .into_iter()
        .map(|(group, members)| {
            let total: u32 = members.iter().map(|record| u32::from(record.scores.get(score))).sum();
            (group, rounded_average(total, members.len()))
        })
        .collect()
}

/// Non-baseline occurrences and severity per problem indicator, most severe first.
pub fn problems_ranking(records: &[BusinessRecord]) -> Vec<ProblemRankingEntry> {
    let mut ranking: Vec<ProblemRankingEntry> = PROBLEM_INDICATORS
        .iter()
        .map(|&(key, name)| {
            let mut count = 0;
            let mut total_severity = 0;
            for record in records {
                let severity = record.choice(key).and_then(severity_of).unwrap_or(0);
                if severity > 1 {
                    count += 1;
                    total_severity += severity;
                }
            }

            ProblemRankingEntry {
                key,
                name,
                count,
                total_severity,
                avg_severity: if count > 0 {
                    f64::from(total_severity) / count as f64
                } else {
                    0.0
                },
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.total_severity.cmp(&a.total_severity));
    ranking
}

// Rara vez = 1, Si pocas veces = 2, Si muchas veces = 3.
fn severity_of(value: &str) -> Option<u32> {
    PROBLEM_FREQUENCIES
        .iter()
        .position(|frequency| *frequency == value)
        .map(|index| index as u32 + 1)
}

pub fn global_kpis(records: &[BusinessRecord]) -> GlobalKpis {
    GlobalKpis {
        total_businesses: records.len(),
        average_scores: average_scores(records.iter()),
        high_risk_count: records
            .iter()
            .filter(|record| record.scores.operational_risk >= HIGH_RISK_THRESHOLD)
            .count(),
        tech_ready_count: records
            .iter()
            .filter(|record| record.scores.tech_adoption_readiness >= TECH_READY_THRESHOLD)
            .count(),
    }
}

pub fn score_bands(records: &[BusinessRecord], score: ScoreKind) -> ScoreBands {
    let bands = ScoreBand::ordered()
        .into_iter()
        .map(|band| {
            let (min, max) = band.range();
            ScoreBandEntry {
                band,
                label: band.label(),
                min,
                max,
                count: records
                    .iter()
                    .filter(|record| ScoreBand::for_score(record.scores.get(score)) == band)
                    .count(),
            }
        })
        .collect();

    ScoreBands { score, bands }
}

/// Record count and all four averages per value of a single-valued field.
pub fn scores_by_dimension(records: &[BusinessRecord], group_field: &str) -> Vec<DimensionScores> {
    group_by(records, group_field)
        .into_iter()
        .map(|(group, members)| DimensionScores {
            group,
            count: members.len(),
            averages: average_scores(members.into_iter()),
        })
        .collect()
}

/// For each dimension option, how many gestion cells sit at each process level.
pub fn process_levels_by_dimension(
    records: &[BusinessRecord],
    group_field: &str,
    options: &[String],
) -> Vec<ProcessLevelRow> {
    options
        .iter()
        .map(|option| {
            let members: Vec<&BusinessRecord> = records
                .iter()
                .filter(|record| group_label(record, group_field).as_deref() == Some(option.as_str()))
                .collect();

            let levels = PROCESS_LEVELS
                .iter()
                .map(|level| LevelCount {
                    level: level.to_string(),
                    count: members
                        .iter()
                        .copied()
                        .flat_map(|record| keys::GESTION.iter().map(move |key| record.choice(key)))
                        .filter(|value| *value == Some(*level))
                        .count(),
                })
                .collect();

            ProcessLevelRow {
                group: option.clone(),
                levels,
            }
        })
        .collect()
}

pub fn low_visibility_share(records: &[BusinessRecord]) -> VisibilityShare {
    let low_visibility = records
        .iter()
        .filter(|record| {
            record
                .choice(keys::VISIBILIDAD_INTERNET)
                .is_some_and(|value| LOW_VISIBILITY.contains(&value))
        })
        .count();

    VisibilityShare {
        low_visibility,
        total: records.len(),
        percentage: if records.is_empty() {
            0
        } else {
            rounded_average(low_visibility as u32 * 100, records.len())
        },
    }
}

/// Records ordered by one score, highest first, with segment and main opportunity.
pub fn score_table(records: &[BusinessRecord], score: ScoreKind) -> Vec<ScoreTableRow> {
    let mut sorted: Vec<&BusinessRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.scores.get(score).cmp(&a.scores.get(score)));

    sorted
        .into_iter()
        .map(|record| {
            let segment = Segment::classify(&record.scores);
            let opportunity = Opportunity::for_scores(&record.scores);
            ScoreTableRow {
                business_name: record.business_name().to_string(),
                business_type: record.choice(keys::TIPO_NEGOCIO).map(str::to_string),
                size: record.choice(keys::TAMANO_NEGOCIO).map(str::to_string),
                scores: record.scores,
                segment,
                segment_label: segment.label(),
                opportunity,
                opportunity_label: opportunity.label(),
            }
        })
        .collect()
}

fn group_label(record: &BusinessRecord, field: &str) -> Option<String> {
    record
        .answer(field)
        .as_label()
        .filter(|label| !label.trim().is_empty())
}

fn group_by<'a>(
    records: &'a [BusinessRecord],
    field: &str,
) -> BTreeMap<String, Vec<&'a BusinessRecord>> {
    let mut groups: BTreeMap<String, Vec<&BusinessRecord>> = BTreeMap::new();
    for record in records {
        if let Some(group) = group_label(record, field) {
            groups.entry(group).or_default().push(record);
        }
    }
    groups
}

fn average_scores<'a>(records: impl Iterator<Item = &'a BusinessRecord>) -> ScoreCard {
    let mut count = 0;
    let mut totals = [0u32; 4];
    for record in records {
        count += 1;
        for (total, kind) in totals.iter_mut().zip(ScoreKind::ordered()) {
            *total += u32::from(record.scores.get(kind));
        }
    }

    ScoreCard {
        digital_maturity: rounded_average(totals[0], count),
        operational_risk: rounded_average(totals[1], count),
        tech_adoption_readiness: rounded_average(totals[2], count),
        scalability_readiness: rounded_average(totals[3], count),
    }
}

fn rounded_average(total: u32, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    (f64::from(total) / count as f64).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::SurveyResponse;

    fn record(name: &str, answers: &[(&str, FieldValue)], scores: ScoreCard) -> BusinessRecord {
        let mut response = SurveyResponse::new(name, name);
        for (key, value) in answers {
            response.answers.insert(key.to_string(), value.clone());
        }
        BusinessRecord { response, scores }
    }

    fn choice(value: &str) -> FieldValue {
        FieldValue::Choice(value.to_string())
    }

    fn cell(value: &str) -> FieldValue {
        FieldValue::Cell(value.to_string())
    }

    fn scores(maturity: u8, risk: u8, adoption: u8, scalability: u8) -> ScoreCard {
        ScoreCard {
            digital_maturity: maturity,
            operational_risk: risk,
            tech_adoption_readiness: adoption,
            scalability_readiness: scalability,
        }
    }

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn distribution_lists_every_option() {
        let records = vec![
            record(
                "a",
                &[(
                    keys::HERRAMIENTAS_DIGITALES,
                    FieldValue::Choices(options(&["WhatsApp", "Excel"])),
                )],
                ScoreCard::default(),
            ),
            record(
                "b",
                &[(
                    keys::HERRAMIENTAS_DIGITALES,
                    FieldValue::Choices(options(&["WhatsApp", "Office"])),
                )],
                ScoreCard::default(),
            ),
            record("c", &[], ScoreCard::default()),
        ];
        let catalog = options(&["WhatsApp", "Office", "Ninguna"]);

        let result = distribution(&records, keys::HERRAMIENTAS_DIGITALES, &catalog);

        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.count("WhatsApp"), Some(2));
        assert_eq!(result.count("Office"), Some(1));
        assert_eq!(result.count("Ninguna"), Some(0));
        assert_eq!(result.count("Excel"), None);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn distribution_counts_scale_levels_by_label() {
        let records = vec![
            record("a", &[(keys::NIVEL_DIGITALIZACION, FieldValue::Level(3))], ScoreCard::default()),
            record("b", &[(keys::NIVEL_DIGITALIZACION, FieldValue::Level(3))], ScoreCard::default()),
        ];
        let catalog = options(&["1", "2", "3", "4", "5"]);

        let result = distribution(&records, keys::NIVEL_DIGITALIZACION, &catalog);
        assert_eq!(result.count("3"), Some(2));
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn averages_skip_records_without_a_group() {
        let records = vec![
            record("a", &[(keys::TIPO_NEGOCIO, choice("Hotel / Hospedaje"))], scores(40, 0, 0, 0)),
            record("b", &[(keys::TIPO_NEGOCIO, choice("Hotel / Hospedaje"))], scores(45, 0, 0, 0)),
            record("c", &[(keys::TIPO_NEGOCIO, choice("Restaurante"))], scores(10, 0, 0, 0)),
            record("d", &[], scores(100, 0, 0, 0)),
        ];

        let averages = average_by_dimension(&records, keys::TIPO_NEGOCIO, ScoreKind::DigitalMaturity);

        assert_eq!(averages.len(), 2);
        assert_eq!(averages["Hotel / Hospedaje"], 43);
        assert_eq!(averages["Restaurante"], 10);
    }

    #[test]
    fn problems_rank_by_total_severity() {
        let records = vec![
            record(
                "a",
                &[
                    (keys::PROBLEMAS_INVENTARIO, cell("Si pocas veces")),
                    (keys::PROBLEMAS_FALTA_INFO, cell("Si muchas veces")),
                    (keys::PROBLEMAS_RESERVAS_DUPLICADAS, cell("Rara vez")),
                ],
                ScoreCard::default(),
            ),
            record(
                "b",
                &[(keys::PROBLEMAS_INVENTARIO, cell("Si pocas veces"))],
                ScoreCard::default(),
            ),
        ];

        let ranking = problems_ranking(&records);
        let order: Vec<&str> = ranking.iter().map(|entry| entry.key).collect();

        assert_eq!(
            order,
            vec![
                keys::PROBLEMAS_INVENTARIO,
                keys::PROBLEMAS_FALTA_INFO,
                keys::PROBLEMAS_RESERVAS_DUPLICADAS,
                keys::PROBLEMAS_ADMINISTRACION,
                keys::PROBLEMAS_DATOS_DISPERSOS,
            ]
        );
        assert_eq!(ranking[0].count, 2);
        assert_eq!(ranking[0].total_severity, 4);
        assert_eq!(ranking[0].avg_severity, 2.0);
        assert_eq!(ranking[2].count, 0);
    }

    #[test]
    fn empty_collection_yields_empty_or_zero_views() {
        let records: Vec<BusinessRecord> = Vec::new();

        assert!(average_by_dimension(&records, keys::TIPO_NEGOCIO, ScoreKind::OperationalRisk).is_empty());

        let ranking = problems_ranking(&records);
        let order: Vec<&str> = ranking.iter().map(|entry| entry.key).collect();
        assert_eq!(order, keys::PROBLEMAS.to_vec());
        assert!(ranking.iter().all(|entry| entry.count == 0 && entry.avg_severity == 0.0));

        let kpis = global_kpis(&records);
        assert_eq!(kpis.total_businesses, 0);
        assert_eq!(kpis.average_scores, ScoreCard::default());

        assert_eq!(low_visibility_share(&records).percentage, 0);
        assert!(score_table(&records, ScoreKind::DigitalMaturity).is_empty());
        assert!(score_bands(&records, ScoreKind::DigitalMaturity)
            .bands
            .iter()
            .all(|band| band.count == 0));
    }

    #[test]
    fn kpis_count_high_risk_and_tech_ready_businesses() {
        let records = vec![
            record("a", &[], scores(20, 70, 60, 10)),
            record("b", &[], scores(81, 69, 59, 31)),
        ];

        let kpis = global_kpis(&records);
        assert_eq!(kpis.high_risk_count, 1);
        assert_eq!(kpis.tech_ready_count, 1);
        assert_eq!(kpis.average_scores, scores(51, 70, 60, 21));
    }

    #[test]
    fn score_bands_use_inclusive_edges() {
        let records = vec![
            record("a", &[], scores(30, 0, 0, 0)),
            record("b", &[], scores(31, 0, 0, 0)),
            record("c", &[], scores(80, 0, 0, 0)),
            record("d", &[], scores(81, 0, 0, 0)),
            record("e", &[], scores(100, 0, 0, 0)),
        ];

        let bands = score_bands(&records, ScoreKind::DigitalMaturity);
        let counts: Vec<usize> = bands.bands.iter().map(|band| band.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn process_levels_cross_tab_counts_every_gestion_cell() {
        let records = vec![
            record(
                "a",
                &[
                    (keys::TAMANO_NEGOCIO, choice("1 a 5 personas")),
                    (keys::GESTION_PAGOS, cell("Digital basica")),
                    (keys::GESTION_RESERVACIONES, cell("Manual")),
                ],
                ScoreCard::default(),
            ),
            record(
                "b",
                &[
                    (keys::TAMANO_NEGOCIO, choice("1 a 5 personas")),
                    (keys::GESTION_PAGOS, cell("Digital basica")),
                ],
                ScoreCard::default(),
            ),
        ];
        let sizes = options(&["1 a 5 personas", "6 a 15 personas"]);

        let rows = process_levels_by_dimension(&records, keys::TAMANO_NEGOCIO, &sizes);

        assert_eq!(rows.len(), 2);
        let small: Vec<usize> = rows[0].levels.iter().map(|level| level.count).collect();
        assert_eq!(small, vec![1, 2, 0]);
        assert!(rows[1].levels.iter().all(|level| level.count == 0));
    }

    #[test]
    fn scores_by_dimension_reports_every_average() {
        let records = vec![
            record("a", &[(keys::TAMANO_NEGOCIO, choice("1 a 5 personas"))], scores(10, 20, 30, 40)),
            record("b", &[(keys::TAMANO_NEGOCIO, choice("1 a 5 personas"))], scores(20, 30, 40, 50)),
        ];

        let groups = scores_by_dimension(&records, keys::TAMANO_NEGOCIO);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].averages, scores(15, 25, 35, 45));
    }

    #[test]
    fn low_visibility_share_is_a_rounded_percentage() {
        let records = vec![
            record("a", &[(keys::VISIBILIDAD_INTERNET, choice("No aparecemos"))], ScoreCard::default()),
            record(
                "b",
                &[(keys::VISIBILIDAD_INTERNET, choice("Solo redes sociales basicas"))],
                ScoreCard::default(),
            ),
            record(
                "c",
                &[(keys::VISIBILIDAD_INTERNET, choice("Bien posicionados y nos buscan"))],
                ScoreCard::default(),
            ),
        ];

        let share = low_visibility_share(&records);
        assert_eq!(share.low_visibility, 2);
        assert_eq!(share.percentage, 67);
    }

    #[test]
    fn score_table_sorts_descending_and_keeps_ties_stable() {
        let records = vec![
            record("low", &[], scores(10, 0, 0, 50)),
            record("first", &[], scores(60, 0, 0, 50)),
            record("second", &[], scores(60, 80, 0, 50)),
        ];

        let table = score_table(&records, ScoreKind::DigitalMaturity);
        let names: Vec<&str> = table.iter().map(|row| row.business_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "low"]);
        assert_eq!(table[1].opportunity, Opportunity::ReduceOperationalRisk);
        assert_eq!(table[1].segment, Segment::HighRisk);
        assert_eq!(table[0].opportunity, Opportunity::Maintain);
    }
}
