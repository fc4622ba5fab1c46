use survey_insights::analytics::{self, Segment};
use survey_insights::survey::catalog::keys;
use survey_insights::{
    DashboardState, FieldValue, ScoreKind, SurveyFilter, SurveyImporter, SurveyPipeline,
};

const ROW_LEN: usize = 135;

fn header() -> Vec<String> {
    let mut row: Vec<String> = (0..ROW_LEN).map(|index| format!("col{index}")).collect();
    row[8] = "Nombre del negocio".to_string();
    row
}

fn business(id: &str, name: &str, cells: &[(usize, &str)]) -> Vec<String> {
    let mut row = vec![String::new(); ROW_LEN];
    row[0] = id.to_string();
    row[8] = name.to_string();
    for (index, value) in cells {
        row[*index] = value.to_string();
    }
    row
}

fn export(rows: &[Vec<String>]) -> Vec<u8> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer.write_record(row).expect("row written");
    }
    writer.into_inner().expect("csv flushed")
}

fn sample_export() -> Vec<u8> {
    export(&[
        header(),
        business(
            "1",
            "Café Luna",
            &[
                (11, "Restaurante"),
                (14, "1 a 5 personas"),
                (17, "Dueño"),
                (26, "WhatsApp; Redes Sociales; Excel"),
                (29, "No aparecemos"),
                (38, "3- promedio"),
                (41, "Manual"),
                (44, "Digital básica"),
                (56, "Si muchas veces"),
                (59, "Si pocas veces"),
                (71, "Dispuesto"),
                (74, "Costo, Falta de tiempo"),
            ],
        ),
        business(
            "2",
            "Hotel Sol",
            &[
                (11, "hotel"),
                (14, "16 a 30 personas"),
                (17, "Administrador"),
                (38, "5"),
                (41, "Digital automatizada"),
                (44, "Digital automatizada"),
                (47, "Digital automatizada"),
                (50, "Digital automatizada"),
                (53, "Digital automatizada"),
                (122, "Sistematica"),
                (125, "Expandirme"),
                (128, "Sin problema"),
            ],
        ),
        business("3", "", &[(11, "Restaurante")]),
        vec!["4".to_string(), "solo id".to_string()],
    ])
}

#[test]
fn importer_normalizes_and_scores_a_survey_export() {
    let outcome = SurveyImporter::standard()
        .from_reader(sample_export().as_slice())
        .expect("export imports");

    assert_eq!(outcome.rows_read, 5);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.skipped.len(), 2);

    let cafe = &outcome.records[0];
    assert_eq!(cafe.business_name(), "Café Luna");
    assert_eq!(cafe.choice(keys::TIPO_NEGOCIO), Some("Restaurante"));
    assert_eq!(cafe.answer(keys::NIVEL_DIGITALIZACION), &FieldValue::Level(3));
    assert_eq!(cafe.choice(keys::GESTION_PAGOS), Some("Digital basica"));
    assert_eq!(cafe.choice(keys::GESTION_INVENTARIOS), None);

    let tools = cafe.choices(keys::HERRAMIENTAS_DIGITALES);
    assert_eq!(tools.len(), 3);
    assert!(tools.iter().any(|tool| tool == "WhatsApp"));
    assert!(tools.iter().any(|tool| tool == "Redes sociales"));
    assert!(tools.iter().any(|tool| tool == "Excel"));

    let hotel = &outcome.records[1];
    assert_eq!(hotel.choice(keys::TIPO_NEGOCIO), Some("Hotel / Hospedaje"));
    assert_eq!(hotel.scores.scalability_readiness, 100);

    for record in &outcome.records {
        for kind in ScoreKind::ordered() {
            assert!(record.scores.get(kind) <= 100);
        }
    }
}

#[test]
fn aggregates_cover_the_whole_collection() {
    let outcome = SurveyImporter::standard()
        .from_reader(sample_export().as_slice())
        .expect("export imports");
    let records = &outcome.records;
    let schema = SurveyImporter::standard().pipeline().schema().clone();

    let tools = schema
        .question(keys::HERRAMIENTAS_DIGITALES)
        .expect("tools question");
    let distribution = analytics::distribution(records, &tools.key, &tools.options);
    assert_eq!(distribution.entries.len(), tools.options.len());
    assert_eq!(distribution.count("WhatsApp"), Some(1));
    assert_eq!(distribution.count("Ninguna"), Some(0));

    let segments = analytics::segment_by_profile(records);
    assert_eq!(segments.total(), records.len());

    let ranking = analytics::problems_ranking(records);
    assert_eq!(ranking[0].key, keys::PROBLEMAS_RESERVAS_DUPLICADAS);
    assert_eq!(ranking[0].total_severity, 3);
    assert_eq!(ranking[1].key, keys::PROBLEMAS_INVENTARIO);

    let visibility = analytics::low_visibility_share(records);
    assert_eq!(visibility.low_visibility, 1);
    assert_eq!(visibility.percentage, 50);
}

#[test]
fn empty_export_produces_empty_views() {
    let outcome = SurveyImporter::standard()
        .from_reader(export(&[header()]).as_slice())
        .expect("header-only export imports");
    assert!(outcome.records.is_empty());

    let averages = analytics::average_by_dimension(
        &outcome.records,
        keys::TIPO_NEGOCIO,
        ScoreKind::DigitalMaturity,
    );
    assert!(averages.is_empty());

    let ranking = analytics::problems_ranking(&outcome.records);
    assert_eq!(ranking.len(), 5);
    assert!(ranking.iter().all(|entry| entry.count == 0));

    let segments = analytics::segment_by_profile(&outcome.records);
    assert!(Segment::ordered()
        .into_iter()
        .all(|segment| segments.count(segment) == 0));
}

#[test]
fn dashboard_state_filters_and_reports() {
    let rows = SurveyImporter::read_rows(sample_export().as_slice()).expect("rows parse");
    let mut state = DashboardState::new(SurveyPipeline::standard(), 1);

    let summary = state.load(&rows);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped, 2);

    let options = state.filter_options();
    assert_eq!(options.business_types, vec!["Restaurante", "Hotel / Hospedaje"]);

    state.apply_filter(SurveyFilter {
        business_types: vec!["Hotel / Hospedaje".to_string()],
        ..SurveyFilter::default()
    });
    let report = state.report();
    assert_eq!(report.filtered_records, 1);
    assert_eq!(report.kpis.average_scores.scalability_readiness, 100);

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["total_records"], 2);
    assert_eq!(json["kpis"]["average_scores"]["scalability_readiness"], 100);
    assert_eq!(json["segments"].as_array().map(Vec::len), Some(5));
}

#[test]
fn mis_encoded_cells_do_not_drop_the_export() {
    let mut data = export(&[
        header(),
        business("1", "Hotel Sol", &[(11, "Hotel"), (38, "4")]),
    ]);
    data.extend_from_slice(b"2,,,,,,,,Caf\xe9 Luna,,,Restaurante\n");

    let outcome = SurveyImporter::standard()
        .from_reader(data.as_slice())
        .expect("export imports despite a Latin-1 cell");

    assert_eq!(outcome.rows_read, 3);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].business_name(), "Hotel Sol");
    assert!(outcome.records[1].business_name().starts_with("Caf"));
    assert_eq!(
        outcome.records[1].choice(keys::TIPO_NEGOCIO),
        Some("Restaurante")
    );
}
