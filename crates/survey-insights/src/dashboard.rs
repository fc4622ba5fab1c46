use crate::analytics::views::{
    DashboardInsights, DimensionScores, Distribution, GlobalKpis, ProblemRankingEntry,
    ProcessLevelRow, ScoreBands, ScoreTableRow, VisibilityShare,
};
use crate::analytics::{self, SegmentCount};
use crate::pipeline::{BusinessRecord, SurveyPipeline};
use crate::scoring::ScoreKind;
use crate::survey::catalog::keys;
use crate::survey::RawRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Questions charted as plain distributions.
const DISTRIBUTION_QUESTIONS: &[&str] = &[
    keys::TIPO_NEGOCIO,
    keys::TAMANO_NEGOCIO,
    keys::RESPONSABLE_OPERACION,
    keys::POSICION_COMPETENCIA,
    keys::HERRAMIENTAS_DIGITALES,
    keys::VISIBILIDAD_INTERNET,
    keys::NIVEL_DIGITALIZACION,
    keys::APERTURA_TECNOLOGICA,
    keys::BARRERAS_TECNOLOGIA,
    keys::CAPACIDAD_APRENDIZAJE_EQUIPO,
    keys::TIPO_CAPACITACION,
    keys::HABILIDADES_FALTANTES,
    keys::ORIGEN_CLIENTES,
    keys::DOCUMENTACION_PROCESOS,
    keys::INDICADORES_ACTUALES,
    keys::SEGUIMIENTO_INDICADORES,
    keys::CAUSA_ERRORES,
    keys::CRITERIOS_DECISION,
    keys::USO_DATOS_DIGITALES,
    keys::INTERES_CRECIMIENTO,
    keys::CAPACIDAD_ESCALAR,
    keys::CONFIANZA_ADOPTAR_TECNOLOGIA,
    keys::INTERES_FINAL_TECNOLOGIA,
];

/// Business type, size and role selections. An empty list selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyFilter {
    #[serde(default)]
    pub business_types: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SurveyFilter {
    pub fn is_empty(&self) -> bool {
        self.business_types.is_empty() && self.sizes.is_empty() && self.roles.is_empty()
    }

    pub fn matches(&self, record: &BusinessRecord) -> bool {
        selects(&self.business_types, record.choice(keys::TIPO_NEGOCIO))
            && selects(&self.sizes, record.choice(keys::TAMANO_NEGOCIO))
            && (self.roles.is_empty()
                || record
                    .choices(keys::RESPONSABLE_OPERACION)
                    .iter()
                    .any(|role| self.roles.contains(role)))
    }
}

fn selects(selected: &[String], value: Option<&str>) -> bool {
    selected.is_empty() || value.is_some_and(|value| selected.iter().any(|item| item == value))
}

/// Distinct values present in the data, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub business_types: Vec<String>,
    pub sizes: Vec<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub records: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub total_records: usize,
    pub filtered_records: usize,
    pub filter: SurveyFilter,
    pub kpis: GlobalKpis,
    pub distributions: Vec<Distribution>,
    pub maturity_by_type: BTreeMap<String, u8>,
    pub scores_by_size: Vec<DimensionScores>,
    pub problems_ranking: Vec<ProblemRankingEntry>,
    pub segments: Vec<SegmentCount>,
    pub score_bands: Vec<ScoreBands>,
    pub process_levels_by_size: Vec<ProcessLevelRow>,
    pub visibility: VisibilityShare,
    pub businesses: Vec<ScoreTableRow>,
    pub insights: DashboardInsights,
}

/// Current record collection and filter. Each load replaces both wholesale.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pipeline: SurveyPipeline,
    header_rows: usize,
    records: Vec<BusinessRecord>,
    filter: SurveyFilter,
}

impl DashboardState {
    pub fn new(pipeline: SurveyPipeline, header_rows: usize) -> Self {
        Self {
            pipeline,
            header_rows,
            records: Vec::new(),
            filter: SurveyFilter::default(),
        }
    }

    pub fn pipeline(&self) -> &SurveyPipeline {
        &self.pipeline
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    pub fn filter(&self) -> &SurveyFilter {
        &self.filter
    }

    pub fn load(&mut self, rows: &[RawRow]) -> LoadSummary {
        let outcome = self.pipeline.process(rows, self.header_rows);
        let summary = LoadSummary {
            rows_read: outcome.rows_read,
            records: outcome.records.len(),
            skipped: outcome.skipped.len(),
        };

        self.records = outcome.records;
        self.filter = SurveyFilter::default();
        summary
    }

    pub fn apply_filter(&mut self, filter: SurveyFilter) {
        self.filter = filter;
        debug!(
            matched = self.filtered().len(),
            total = self.records.len(),
            "survey filter applied"
        );
    }

    pub fn reset_filter(&mut self) {
        self.filter = SurveyFilter::default();
    }

    pub fn filtered(&self) -> Vec<&BusinessRecord> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        let mut options = FilterOptions::default();
        for record in &self.records {
            push_distinct(&mut options.business_types, record.choice(keys::TIPO_NEGOCIO));
            push_distinct(&mut options.sizes, record.choice(keys::TAMANO_NEGOCIO));
            for role in record.choices(keys::RESPONSABLE_OPERACION) {
                push_distinct(&mut options.roles, Some(role.as_str()));
            }
        }
        options
    }

    pub fn report(&self) -> DashboardReport {
        let records: Vec<BusinessRecord> = self.filtered().into_iter().cloned().collect();
        let schema = self.pipeline.schema();
        let options_of = |key: &str| {
            schema
                .question(key)
                .map(|question| question.options.clone())
                .unwrap_or_default()
        };

        let distributions = DISTRIBUTION_QUESTIONS
            .iter()
            .filter_map(|key| schema.question(key))
            .map(|question| analytics::distribution(&records, &question.key, &question.options))
            .collect();

        let kpis = analytics::global_kpis(&records);
        let segments = analytics::segment_by_profile(&records);
        let insights = analytics::generate_insights(&kpis, &segments);

        DashboardReport {
            total_records: self.records.len(),
            filtered_records: records.len(),
            filter: self.filter.clone(),
            distributions,
            maturity_by_type: analytics::average_by_dimension(
                &records,
                keys::TIPO_NEGOCIO,
                ScoreKind::DigitalMaturity,
            ),
            scores_by_size: analytics::scores_by_dimension(&records, keys::TAMANO_NEGOCIO),
            problems_ranking: analytics::problems_ranking(&records),
            segments: segments.counts(),
            score_bands: ScoreKind::ordered()
                .into_iter()
                .map(|kind| analytics::score_bands(&records, kind))
                .collect(),
            process_levels_by_size: analytics::process_levels_by_dimension(
                &records,
                keys::TAMANO_NEGOCIO,
                &options_of(keys::TAMANO_NEGOCIO),
            ),
            visibility: analytics::low_visibility_share(&records),
            businesses: analytics::score_table(&records, ScoreKind::DigitalMaturity),
            insights,
            kpis,
        }
    }
}

fn push_distinct(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        if !values.iter().any(|existing| existing == value) {
            values.push(value.to_string());
        }
    }
}
