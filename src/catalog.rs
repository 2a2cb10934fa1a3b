use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_PROJECT_TYPE: &str = "web";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    NoSprints { id: String },
    UnknownSprint { id: String, sprint: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::NoSprints { id } => {
                write!(f, "project type '{id}' must define at least one sprint")
            }
            TemplateError::UnknownSprint { id, sprint } => write!(
                f,
                "project type '{id}' lists tasks for undeclared sprint '{sprint}'"
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

/// A project category: its ordered sprints and the task pool of each sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTemplate {
    id: String,
    title: String,
    sprints: Vec<String>,
    tasks_by_sprint: HashMap<String, Vec<String>>,
}

impl ProjectTemplate {
    pub fn new<S, P, T>(
        id: impl Into<String>,
        title: impl Into<String>,
        sprints: S,
        tasks_by_sprint: P,
    ) -> Result<Self, TemplateError>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        P: IntoIterator<Item = (String, T)>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let id = id.into();
        let sprints: Vec<String> = sprints.into_iter().map(Into::into).collect();
        if sprints.is_empty() {
            return Err(TemplateError::NoSprints { id });
        }
        let mut pools = HashMap::new();
        for (sprint, tasks) in tasks_by_sprint {
            if !sprints.contains(&sprint) {
                return Err(TemplateError::UnknownSprint { id, sprint });
            }
            pools.insert(sprint, tasks.into_iter().map(Into::into).collect());
        }
        Ok(Self {
            id,
            title: title.into(),
            sprints,
            tasks_by_sprint: pools,
        })
    }

    /// Builds a template without validation.
    #[doc(hidden)]
    pub fn unchecked(
        id: impl Into<String>,
        sprints: Vec<String>,
        tasks_by_sprint: HashMap<String, Vec<String>>,
    ) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            sprints,
            tasks_by_sprint,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sprints(&self) -> &[String] {
        &self.sprints
    }

    /// Task pool for `sprint`; empty when the sprint has none.
    pub fn tasks_for(&self, sprint: &str) -> &[String] {
        self.tasks_by_sprint
            .get(sprint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Fixed, ordered set of project types.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<ProjectTemplate>,
}

impl Catalog {
    pub fn new(templates: Vec<ProjectTemplate>) -> Self {
        Self { templates }
    }

    pub fn builtin() -> Self {
        let templates = builtin_definitions()
            .into_iter()
            .filter_map(|def| {
                let pools = def
                    .tasks
                    .iter()
                    .map(|(sprint, tasks)| (sprint.to_string(), tasks.iter().copied()));
                match ProjectTemplate::new(def.id, def.title, def.sprints.iter().copied(), pools) {
                    Ok(template) => Some(template),
                    Err(err) => {
                        log::warn!("skipping built-in project type: {err}");
                        None
                    }
                }
            })
            .collect();
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectTemplate> {
        self.templates.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ProjectTemplate> {
        self.templates.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&ProjectTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.id == id)
    }

    pub fn next_index(&self, index: usize) -> usize {
        if self.templates.is_empty() {
            return 0;
        }
        (index + 1) % self.templates.len()
    }

    pub fn prev_index(&self, index: usize) -> usize {
        let len = self.templates.len();
        if len == 0 {
            return 0;
        }
        (index % len + len - 1) % len
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

struct TemplateDefinition {
    id: &'static str,
    title: &'static str,
    sprints: &'static [&'static str],
    tasks: &'static [(&'static str, &'static [&'static str])],
}

fn builtin_definitions() -> Vec<TemplateDefinition> {
    vec![
        TemplateDefinition {
            id: "web",
            title: "Desarrollo Web",
            sprints: &[
                "Sprint 1 — Planificación",
                "Sprint 2 — Configuración",
                "Sprint 3 — Frontend",
                "Sprint 4 — Backend",
                "Sprint 5 — Integración y Pruebas",
                "Sprint 6 — Despliegue y Documentación",
            ],
            tasks: &[
                (
                    "Sprint 1 — Planificación",
                    &[
                        "Reunión inicial y definición de alcance",
                        "Análisis de requerimientos",
                        "Wireframes y arquitectura",
                    ],
                ),
                (
                    "Sprint 2 — Configuración",
                    &[
                        "Crear repositorio y configuración de Git",
                        "Configurar entorno (Node, Next, Tailwind)",
                        "Estructura inicial del proyecto",
                    ],
                ),
                (
                    "Sprint 3 — Frontend",
                    &[
                        "Diseñar componentes base",
                        "Implementar páginas principales",
                        "Adaptar estilos y responsive",
                    ],
                ),
                (
                    "Sprint 4 — Backend",
                    &[
                        "Diseñar la API y endpoints",
                        "Conectar base de datos",
                        "Autenticación básica",
                    ],
                ),
                (
                    "Sprint 5 — Integración y Pruebas",
                    &[
                        "Integrar frontend con API",
                        "Pruebas funcionales y corrección de bugs",
                    ],
                ),
                (
                    "Sprint 6 — Despliegue y Documentación",
                    &[
                        "Preparar build y despliegue",
                        "Configurar dominio y HTTPS",
                        "Documentación de uso y entrega",
                    ],
                ),
            ],
        },
        TemplateDefinition {
            id: "mobile",
            title: "Apps Móviles",
            sprints: &[
                "Sprint 1 — Planificación",
                "Sprint 2 — Diseño UI/UX",
                "Sprint 3 — Desarrollo (App)",
                "Sprint 4 — Backend & APIs",
                "Sprint 5 — QA y Tests",
                "Sprint 6 — Publicación",
            ],
            tasks: &[
                (
                    "Sprint 1 — Planificación",
                    &["Reunión de alcance", "Definir plataformas (iOS/Android)"],
                ),
                (
                    "Sprint 2 — Diseño UI/UX",
                    &["Wireframes móviles", "Prototipos en Figma"],
                ),
                (
                    "Sprint 3 — Desarrollo (App)",
                    &["Implementar pantallas", "Navegación y estado"],
                ),
                (
                    "Sprint 4 — Backend & APIs",
                    &["Endpoints móviles", "Autenticación y sync"],
                ),
                (
                    "Sprint 5 — QA y Tests",
                    &["Pruebas en dispositivos", "Corrección de errores"],
                ),
                (
                    "Sprint 6 — Publicación",
                    &["Publicar en Stores", "Monitoreo post-release"],
                ),
            ],
        },
        TemplateDefinition {
            id: "cloud",
            title: "Proyectos en la Nube",
            sprints: &[
                "Sprint 1 — Diseño de Arquitectura",
                "Sprint 2 — Infraestructura",
                "Sprint 3 — Desarrollo y Microservicios",
                "Sprint 4 — Integración",
                "Sprint 5 — Harden & Security",
                "Sprint 6 — Despliegue y Monitoring",
            ],
            tasks: &[
                (
                    "Sprint 1 — Diseño de Arquitectura",
                    &["Diseñar arquitectura cloud", "Decidir servicios (DB, queues)"],
                ),
                (
                    "Sprint 2 — Infraestructura",
                    &["Provisionar infra", "IaC (Terraform)"],
                ),
                (
                    "Sprint 3 — Desarrollo y Microservicios",
                    &["Implementar servicios", "Contenerizar con Docker"],
                ),
                (
                    "Sprint 4 — Integración",
                    &["CI/CD pipelines", "Pruebas de integración"],
                ),
                (
                    "Sprint 5 — Harden & Security",
                    &["Políticas IAM", "Escaneo de vulnerabilidades"],
                ),
                (
                    "Sprint 6 — Despliegue y Monitoring",
                    &["Desplegar producción", "Configurar monitoring/alerts"],
                ),
            ],
        },
        TemplateDefinition {
            id: "security",
            title: "Ciberseguridad",
            sprints: &[
                "Sprint 1 — Evaluación",
                "Sprint 2 — Pruebas (Pentest)",
                "Sprint 3 — Reportes",
                "Sprint 4 — Mitigación",
                "Sprint 5 — Revisión",
            ],
            tasks: &[
                (
                    "Sprint 1 — Evaluación",
                    &[
                        "Mapeo de activos",
                        "Recolección de requisitos de seguridad",
                    ],
                ),
                (
                    "Sprint 2 — Pruebas (Pentest)",
                    &["Pentesting interno", "Pruebas externas"],
                ),
                (
                    "Sprint 3 — Reportes",
                    &[
                        "Generar informe de vulnerabilidades",
                        "Priorizar hallazgos",
                    ],
                ),
                (
                    "Sprint 4 — Mitigación",
                    &["Aplicar parches y controles", "Configuración segura"],
                ),
                (
                    "Sprint 5 — Revisión",
                    &["Verificar mitigaciones", "Plan de mejora continua"],
                ),
            ],
        },
        TemplateDefinition {
            id: "ai",
            title: "Inteligencia Artificial",
            sprints: &[
                "Sprint 1 — Preparación de Datos",
                "Sprint 2 — Exploración y ETL",
                "Sprint 3 — Entrenamiento",
                "Sprint 4 — Evaluación",
                "Sprint 5 — Despliegue",
                "Sprint 6 — Monitoreo",
            ],
            tasks: &[
                (
                    "Sprint 1 — Preparación de Datos",
                    &["Recolectar datos", "Etiquetado y limpieza"],
                ),
                (
                    "Sprint 2 — Exploración y ETL",
                    &["Análisis exploratorio", "Pipeline ETL"],
                ),
                (
                    "Sprint 3 — Entrenamiento",
                    &["Entrenar modelos", "Tuning y validación"],
                ),
                (
                    "Sprint 4 — Evaluación",
                    &["Métricas y pruebas A/B", "Robustez"],
                ),
                (
                    "Sprint 5 — Despliegue",
                    &["Deploy del modelo", "API de inferencia"],
                ),
                (
                    "Sprint 6 — Monitoreo",
                    &["Monitoreo de modelos", "Retraining planificado"],
                ),
            ],
        },
    ]
}
