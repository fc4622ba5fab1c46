use super::config::ScoreWeights;
use super::{ScoreComponent, ScoreKind, SubFactor};
use crate::survey::catalog::keys;
use crate::survey::SurveyResponse;

const ADVANCED_TOOLS: [&str; 3] = ["Sistemas especializados", "Punto de venta", "Google Sheets"];
const DIGITAL_DOCUMENTATION: [&str; 3] = ["Excel / Sheets", "Documentados", "Videos"];
const UNDOCUMENTED: &str = "En mi cabeza";
const DIGITAL_BASIC: &str = "Digital basica";
const DIGITAL_AUTOMATED: &str = "Digital automatizada";
const FREQUENT_PROBLEM: &str = "Si muchas veces";
const OCCASIONAL_PROBLEM: &str = "Si pocas veces";

/// Neutral midpoint for capability questions left unanswered or answered off-catalog.
pub(crate) const NEUTRAL_CAPABILITY: f64 = 50.0;

const DATA_USAGE: &[(&str, f64)] = &[
    ("No uso informacion", 0.0),
    ("Ocasional", 25.0),
    ("Algunas decisiones", 50.0),
    ("Frecuente", 75.0),
    ("Sistematica", 100.0),
];

const KEY_PERSON_DEPENDENCY: &[(&str, f64)] = &[
    ("Sin problema", 0.0),
    ("Algunas dificultades", 40.0),
    ("Muchos problemas", 70.0),
    ("Seriamente afectado", 100.0),
];

const OPENNESS: &[(&str, f64)] = &[
    ("Muy poco", 0.0),
    ("Neutral", 33.0),
    ("Dispuesto", 66.0),
    ("Muy dispuesto", 100.0),
];

const TEAM_LEARNING: &[(&str, f64)] = &[
    ("Aprende rapido", 100.0),
    ("Necesita acompanamiento", 60.0),
    ("Le cuesta mucho", 20.0),
];

const PERSONAL_COMFORT: &[(&str, f64)] = &[
    ("Muy comodo", 100.0),
    ("Se me dificulta", 40.0),
    ("No es de mi interes", 0.0),
];

const SCALING_CAPACITY: &[(&str, f64)] = &[
    ("Sin problema", 100.0),
    ("Me costaria trabajo", 50.0),
    ("Muy complicado", 20.0),
    ("No es posible hoy", 0.0),
];

const GROWTH_INTENT: &[(&str, f64)] = &[
    ("Mantenerme", 20.0),
    ("Crecer poco a poco", 60.0),
    ("Expandirme", 100.0),
    ("No lo he pensado", 0.0),
];

/// Catalog facts the formulas need, captured from the schema when the engine is built.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoringCatalog {
    pub digitization_bounds: (i64, i64),
    pub barrier_options: Vec<String>,
    pub error_cause_options: Vec<String>,
    pub documentation_options: usize,
}

pub(crate) fn digital_maturity(
    response: &SurveyResponse,
    weights: &ScoreWeights,
    catalog: &ScoringCatalog,
) -> Vec<ScoreComponent> {
    let w = &weights.digital_maturity;
    let kind = ScoreKind::DigitalMaturity;

    let digitization = response
        .level(keys::NIVEL_DIGITALIZACION)
        .map(|level| linear(level, catalog.digitization_bounds))
        .unwrap_or(0.0);

    let tools = response.choices(keys::HERRAMIENTAS_DIGITALES);
    let advanced_tools = ratio(count_in(tools, &ADVANCED_TOOLS), ADVANCED_TOOLS.len());

    let digital_processes = ratio(
        count_processes(response, &[DIGITAL_BASIC, DIGITAL_AUTOMATED]),
        keys::GESTION.len(),
    );

    let documentation = response.choices(keys::DOCUMENTACION_PROCESOS);
    let digital_documentation = ratio(
        count_in(documentation, &DIGITAL_DOCUMENTATION),
        catalog.documentation_options,
    );

    vec![
        component(kind, SubFactor::DigitizationLevel, digitization, w.digitization_level),
        component(kind, SubFactor::AdvancedTools, advanced_tools, w.advanced_tools),
        component(kind, SubFactor::DigitalProcesses, digital_processes, w.digital_processes),
        component(kind, SubFactor::DataUsage, data_usage(response), w.data_usage),
        component(
            kind,
            SubFactor::DigitalDocumentation,
            digital_documentation,
            w.digital_documentation,
        ),
    ]
}

pub(crate) fn operational_risk(
    response: &SurveyResponse,
    weights: &ScoreWeights,
    catalog: &ScoringCatalog,
) -> Vec<ScoreComponent> {
    let w = &weights.operational_risk;
    let kind = ScoreKind::OperationalRisk;

    let problem_points: f64 = keys::PROBLEMAS
        .iter()
        .map(|key| match response.choice(key) {
            Some(FREQUENT_PROBLEM) => 100.0,
            Some(OCCASIONAL_PROBLEM) => 50.0,
            _ => 0.0,
        })
        .sum();
    let operational_problems = problem_points / keys::PROBLEMAS.len() as f64;

    let dependency = lookup(
        KEY_PERSON_DEPENDENCY,
        response.choice(keys::RIESGO_SALIDA_RESPONSABLE_TI),
        0.0,
    );

    let undocumented = if response
        .choices(keys::DOCUMENTACION_PROCESOS)
        .iter()
        .any(|item| item == UNDOCUMENTED)
    {
        100.0
    } else {
        0.0
    };

    let causes = response.choices(keys::CAUSA_ERRORES);
    let error_causes = ratio(
        count_in(causes, &catalog.error_cause_options),
        catalog.error_cause_options.len(),
    );

    vec![
        component(
            kind,
            SubFactor::OperationalProblems,
            operational_problems,
            w.operational_problems,
        ),
        component(kind, SubFactor::KeyPersonDependency, dependency, w.key_person_dependency),
        component(
            kind,
            SubFactor::UndocumentedKnowledge,
            undocumented,
            w.undocumented_knowledge,
        ),
        component(kind, SubFactor::ErrorCauses, error_causes, w.error_causes),
    ]
}

pub(crate) fn tech_adoption_readiness(
    response: &SurveyResponse,
    weights: &ScoreWeights,
    catalog: &ScoringCatalog,
) -> Vec<ScoreComponent> {
    let w = &weights.tech_adoption_readiness;
    let kind = ScoreKind::TechAdoptionReadiness;

    let openness = lookup(OPENNESS, response.choice(keys::APERTURA_TECNOLOGICA), 0.0);

    let barriers = response.choices(keys::BARRERAS_TECNOLOGIA);
    let barrier_share = ratio(
        count_in(barriers, &catalog.barrier_options),
        catalog.barrier_options.len(),
    );
    let barriers = (100.0 - barrier_share).max(0.0);

    let team_learning = lookup(
        TEAM_LEARNING,
        response.choice(keys::CAPACIDAD_APRENDIZAJE_EQUIPO),
        NEUTRAL_CAPABILITY,
    );
    let personal_comfort = lookup(
        PERSONAL_COMFORT,
        response.choice(keys::COMODIDAD_APRENDER_TECNOLOGIA),
        NEUTRAL_CAPABILITY,
    );

    vec![
        component(kind, SubFactor::Openness, openness, w.openness),
        component(kind, SubFactor::Barriers, barriers, w.barriers),
        component(kind, SubFactor::TeamLearning, team_learning, w.team_learning),
        component(kind, SubFactor::PersonalComfort, personal_comfort, w.personal_comfort),
    ]
}

pub(crate) fn scalability_readiness(
    response: &SurveyResponse,
    weights: &ScoreWeights,
) -> Vec<ScoreComponent> {
    let w = &weights.scalability_readiness;
    let kind = ScoreKind::ScalabilityReadiness;

    let scaling_capacity = lookup(
        SCALING_CAPACITY,
        response.choice(keys::CAPACIDAD_ESCALAR),
        NEUTRAL_CAPABILITY,
    );

    // Automated processes count twice: once as automated, once as digital.
    let automated = count_processes(response, &[DIGITAL_AUTOMATED]);
    let digital = count_processes(response, &[DIGITAL_BASIC, DIGITAL_AUTOMATED]);
    let automation = ratio(automated * 2 + digital, keys::GESTION.len() * 2);

    let growth_intent = lookup(GROWTH_INTENT, response.choice(keys::INTERES_CRECIMIENTO), 0.0);

    vec![
        component(kind, SubFactor::ScalingCapacity, scaling_capacity, w.scaling_capacity),
        component(kind, SubFactor::Automation, automation, w.automation),
        component(kind, SubFactor::DataUsage, data_usage(response), w.data_usage),
        component(kind, SubFactor::GrowthIntent, growth_intent, w.growth_intent),
    ]
}

fn data_usage(response: &SurveyResponse) -> f64 {
    lookup(DATA_USAGE, response.choice(keys::USO_DATOS_DIGITALES), 0.0)
}

fn component(kind: ScoreKind, factor: SubFactor, value: f64, weight: f64) -> ScoreComponent {
    ScoreComponent {
        score: kind,
        factor,
        value,
        weight,
        contribution: value * weight,
    }
}

fn lookup(table: &[(&str, f64)], answer: Option<&str>, default: f64) -> f64 {
    answer
        .and_then(|answer| {
            table
                .iter()
                .find(|(option, _)| *option == answer)
                .map(|(_, points)| *points)
        })
        .unwrap_or(default)
}

fn linear(level: i64, (min, max): (i64, i64)) -> f64 {
    if max <= min {
        return 100.0;
    }
    (level - min) as f64 / (max - min) as f64 * 100.0
}

fn ratio(count: usize, reference: usize) -> f64 {
    if reference == 0 {
        return 0.0;
    }
    (count as f64 / reference as f64 * 100.0).min(100.0)
}

fn count_in<S: AsRef<str>>(items: &[String], reference: &[S]) -> usize {
    items
        .iter()
        .filter(|item| reference.iter().any(|option| option.as_ref() == item.as_str()))
        .count()
}

fn count_processes(response: &SurveyResponse, levels: &[&str]) -> usize {
    keys::GESTION
        .iter()
        .filter(|key| {
            response
                .choice(key)
                .is_some_and(|level| levels.contains(&level))
        })
        .count()
}
