use super::schema::{QuestionSpec, QuestionType};

pub(crate) const RESPONDENT_ID_COLUMN: usize = 0;
pub(crate) const BUSINESS_NAME_COLUMN: usize = 8;
pub(crate) const MIN_ROW_LEN: usize = 10;

/// Question keys of the built-in questionnaire.
pub mod keys {
    pub const TIPO_NEGOCIO: &str = "tipoNegocio";
    pub const TAMANO_NEGOCIO: &str = "tamanoNegocio";
    pub const RESPONSABLE_OPERACION: &str = "responsableOperacion";
    pub const EDAD_PERSONAL: &str = "edadPersonal";
    pub const POSICION_COMPETENCIA: &str = "posicionCompetencia";

    pub const HERRAMIENTAS_DIGITALES: &str = "herramientasDigitales";
    pub const VISIBILIDAD_INTERNET: &str = "visibilidadInternet";
    pub const EXPECTATIVA_TECNOLOGIA_CLIENTES: &str = "expectativaTecnologiaClientes";
    pub const PREPARACION_GOOGLE_CHATGPT: &str = "preparacionGoogleChatGPT";
    pub const NIVEL_DIGITALIZACION: &str = "nivelDigitalizacion";

    pub const GESTION_RESERVACIONES: &str = "gestionReservaciones";
    pub const GESTION_PAGOS: &str = "gestionPagos";
    pub const GESTION_INVENTARIOS: &str = "gestionInventarios";
    pub const GESTION_FACTURACION: &str = "gestionFacturacion";
    pub const GESTION_ATENCION_CLIENTES: &str = "gestionAtencionClientes";

    pub const PROBLEMAS_RESERVAS_DUPLICADAS: &str = "problemasReservasDuplicadas";
    pub const PROBLEMAS_INVENTARIO: &str = "problemasInventario";
    pub const PROBLEMAS_ADMINISTRACION: &str = "problemasAdministracion";
    pub const PROBLEMAS_FALTA_INFO: &str = "problemasFaltaInfo";
    pub const PROBLEMAS_DATOS_DISPERSOS: &str = "problemasDatosDispersos";

    pub const APERTURA_TECNOLOGICA: &str = "aperturaTecnologica";
    pub const BARRERAS_TECNOLOGIA: &str = "barrerasTecnologia";

    pub const RESPONSABLE_TECNOLOGIA: &str = "responsableTecnologia";
    pub const CAPACIDAD_APRENDIZAJE_EQUIPO: &str = "capacidadAprendizajeEquipo";
    pub const COMODIDAD_APRENDER_TECNOLOGIA: &str = "comodidadAprenderTecnologia";
    pub const TIPO_CAPACITACION: &str = "tipoCapacitacion";
    pub const RIESGO_SALIDA_RESPONSABLE_TI: &str = "riesgoSalidaResponsableTI";
    pub const HABILIDADES_FALTANTES: &str = "habilidadesFaltantes";

    pub const ORIGEN_CLIENTES: &str = "origenClientes";
    pub const FACILIDAD_ONBOARDING_PERSONAL: &str = "facilidadOnboardingPersonal";
    pub const DOCUMENTACION_PROCESOS: &str = "documentacionProcesos";
    pub const INDICADORES_ACTUALES: &str = "indicadoresActuales";
    pub const SEGUIMIENTO_INDICADORES: &str = "seguimientoIndicadores";
    pub const CAUSA_ERRORES: &str = "causaErrores";

    pub const TOMA_DECISIONES: &str = "tomaDecisiones";
    pub const CRITERIOS_DECISION: &str = "criteriosDecision";
    pub const USO_DATOS_DIGITALES: &str = "usoDatosDigitales";
    pub const INTERES_CRECIMIENTO: &str = "interesCrecimiento";
    pub const CAPACIDAD_ESCALAR: &str = "capacidadEscalar";
    pub const CONFIANZA_ADOPTAR_TECNOLOGIA: &str = "confianzaAdoptarTecnologia";

    pub const INTERES_FINAL_TECNOLOGIA: &str = "interesFinalTecnologia";

    /// Process-management matrix rows, in questionnaire order.
    pub const GESTION: [&str; 5] = [
        GESTION_RESERVACIONES,
        GESTION_PAGOS,
        GESTION_INVENTARIOS,
        GESTION_FACTURACION,
        GESTION_ATENCION_CLIENTES,
    ];

    /// Operational-problem matrix rows, in questionnaire order.
    pub const PROBLEMAS: [&str; 5] = [
        PROBLEMAS_RESERVAS_DUPLICADAS,
        PROBLEMAS_INVENTARIO,
        PROBLEMAS_ADMINISTRACION,
        PROBLEMAS_FALTA_INFO,
        PROBLEMAS_DATOS_DISPERSOS,
    ];
}

/// Shared option set of the process-management matrix.
pub const PROCESS_LEVELS: [&str; 3] = ["Manual", "Digital basica", "Digital automatizada"];

/// Shared option set of the operational-problem matrix; the first entry is the baseline.
pub const PROBLEM_FREQUENCIES: [&str; 3] = ["Rara vez", "Si pocas veces", "Si muchas veces"];

const SCALE_1_TO_5: &[&str] = &["1", "2", "3", "4", "5"];

use keys::*;
use QuestionType::{Matrix, Multi, Scale, Single};

const QUESTIONS: &[(&str, usize, QuestionType, &[&str])] = &[
    // Business profile
    (
        TIPO_NEGOCIO,
        11,
        Single,
        &[
            "Restaurante",
            "Hotel / Hospedaje",
            "Vinedo / Casa de vino",
            "Tour / Experiencia turistica",
            "Institucion Educativa",
            "Otro",
        ],
    ),
    (
        TAMANO_NEGOCIO,
        14,
        Single,
        &[
            "1 a 5 personas",
            "6 a 15 personas",
            "16 a 30 personas",
            "Mas de 30 personas",
        ],
    ),
    (
        RESPONSABLE_OPERACION,
        17,
        Multi,
        &[
            "Dueno",
            "Administrador / Gerente / Rector",
            "Familiar",
            "Personal joven / apoyo digital",
        ],
    ),
    (
        EDAD_PERSONAL,
        20,
        Multi,
        &["20 a 30 anos", "31 a 45 anos", "45 a 60 anos", "Mas de 60 anos"],
    ),
    (
        POSICION_COMPETENCIA,
        23,
        Single,
        &[
            "Mejor que la mayoria",
            "Similar",
            "Un poco rezagado",
            "Muy rezagado",
            "No lo se",
        ],
    ),
    // Technology and digitization
    (
        HERRAMIENTAS_DIGITALES,
        26,
        Multi,
        &[
            "WhatsApp",
            "Redes sociales",
            "Sistemas especializados",
            "Punto de venta",
            "Office",
            "Google Sheets",
            "Ninguna",
        ],
    ),
    (
        VISIBILIDAD_INTERNET,
        29,
        Single,
        &[
            "No aparecemos",
            "Solo redes sociales basicas",
            "Aparecemos en Google sin estrategia",
            "Buena presencia en Google y redes",
            "Bien posicionados y nos buscan",
        ],
    ),
    (
        EXPECTATIVA_TECNOLOGIA_CLIENTES,
        32,
        Single,
        &["Si", "Tal vez", "No", "No lo he pensado"],
    ),
    (
        PREPARACION_GOOGLE_CHATGPT,
        35,
        Single,
        &[
            "No lo habia pensado",
            "No estamos preparados",
            "Algo preparados",
            "Bastante preparados",
        ],
    ),
    (NIVEL_DIGITALIZACION, 38, Scale, SCALE_1_TO_5),
    // Process management matrix
    (GESTION_RESERVACIONES, 41, Matrix, &PROCESS_LEVELS),
    (GESTION_PAGOS, 44, Matrix, &PROCESS_LEVELS),
    (GESTION_INVENTARIOS, 47, Matrix, &PROCESS_LEVELS),
    (GESTION_FACTURACION, 50, Matrix, &PROCESS_LEVELS),
    (GESTION_ATENCION_CLIENTES, 53, Matrix, &PROCESS_LEVELS),
    // Operational problems matrix
    (PROBLEMAS_RESERVAS_DUPLICADAS, 56, Matrix, &PROBLEM_FREQUENCIES),
    (PROBLEMAS_INVENTARIO, 59, Matrix, &PROBLEM_FREQUENCIES),
    (PROBLEMAS_ADMINISTRACION, 62, Matrix, &PROBLEM_FREQUENCIES),
    (PROBLEMAS_FALTA_INFO, 65, Matrix, &PROBLEM_FREQUENCIES),
    (PROBLEMAS_DATOS_DISPERSOS, 68, Matrix, &PROBLEM_FREQUENCIES),
    // Technology adoption
    (
        APERTURA_TECNOLOGICA,
        71,
        Single,
        &["Muy poco", "Neutral", "Dispuesto", "Muy dispuesto"],
    ),
    (
        BARRERAS_TECNOLOGIA,
        74,
        Multi,
        &[
            "Costo",
            "Falta de tiempo",
            "No saber usarla",
            "Desconfianza",
            "Nadie que me ayude",
        ],
    ),
    // People and skills
    (
        RESPONSABLE_TECNOLOGIA,
        77,
        Single,
        &["Yo", "Colaborador joven", "Familiar", "Externo", "Nadie"],
    ),
    (
        CAPACIDAD_APRENDIZAJE_EQUIPO,
        80,
        Single,
        &["Aprende rapido", "Necesita acompanamiento", "Le cuesta mucho"],
    ),
    (
        COMODIDAD_APRENDER_TECNOLOGIA,
        83,
        Single,
        &["Muy comodo", "Se me dificulta", "No es de mi interes"],
    ),
    (
        TIPO_CAPACITACION,
        86,
        Multi,
        &[
            "Taller presencial",
            "Videos cortos",
            "Acompanamiento 1 a 1",
            "Manuales sencillos",
        ],
    ),
    (
        RIESGO_SALIDA_RESPONSABLE_TI,
        89,
        Single,
        &[
            "Sin problema",
            "Algunas dificultades",
            "Muchos problemas",
            "Seriamente afectado",
        ],
    ),
    (
        HABILIDADES_FALTANTES,
        92,
        Multi,
        &[
            "Uso de tecnologia",
            "Organizacion",
            "Atencion al cliente",
            "Analisis de informacion",
            "Liderazgo",
            "Procesos",
        ],
    ),
    // Operations and processes
    (
        ORIGEN_CLIENTES,
        95,
        Multi,
        &[
            "Recomendacion",
            "Redes sociales",
            "WhatsApp",
            "Google",
            "Campanas digitales",
        ],
    ),
    (
        FACILIDAD_ONBOARDING_PERSONAL,
        98,
        Single,
        &["Muy facil", "Regular", "Dificil", "Depende"],
    ),
    (
        DOCUMENTACION_PROCESOS,
        101,
        Multi,
        &[
            "En mi cabeza",
            "Libretas",
            "Excel / Sheets",
            "Documentados",
            "Videos",
        ],
    ),
    (
        INDICADORES_ACTUALES,
        107,
        Multi,
        &["Ventas", "Ocupacion", "Costos", "Rentabilidad", "Otros"],
    ),
    (
        SEGUIMIENTO_INDICADORES,
        110,
        Single,
        &["Cuaderno", "Excel / Sheets", "Sistema", "No llevo control"],
    ),
    (
        CAUSA_ERRORES,
        113,
        Multi,
        &[
            "Falta de informacion",
            "Falta de comunicacion",
            "Falta de herramientas",
            "Falta de capacitacion",
        ],
    ),
    // Decision making
    (
        TOMA_DECISIONES,
        116,
        Single,
        &["Dueno", "En conjunto", "Segun urgencia"],
    ),
    (
        CRITERIOS_DECISION,
        119,
        Multi,
        &["Experiencia", "Intuicion", "Datos", "Opinion de otros"],
    ),
    (
        USO_DATOS_DIGITALES,
        122,
        Single,
        &[
            "No uso informacion",
            "Ocasional",
            "Algunas decisiones",
            "Frecuente",
            "Sistematica",
        ],
    ),
    // Scalability
    (
        INTERES_CRECIMIENTO,
        125,
        Single,
        &[
            "Mantenerme",
            "Crecer poco a poco",
            "Expandirme",
            "No lo he pensado",
        ],
    ),
    (
        CAPACIDAD_ESCALAR,
        128,
        Single,
        &[
            "Sin problema",
            "Me costaria trabajo",
            "Muy complicado",
            "No es posible hoy",
        ],
    ),
    (
        CONFIANZA_ADOPTAR_TECNOLOGIA,
        131,
        Multi,
        &[
            "Casos locales",
            "Acompanamiento",
            "Bajo costo",
            "Capacitacion clara",
        ],
    ),
    (
        INTERES_FINAL_TECNOLOGIA,
        134,
        Single,
        &["Menor", "Igual", "Mayor", "Mucho mayor"],
    ),
];

pub(crate) fn standard_questions() -> Vec<QuestionSpec> {
    QUESTIONS
        .iter()
        .map(|(key, column, question_type, options)| {
            QuestionSpec::new(*key, *column, *question_type, options.iter().copied())
        })
        .collect()
}
