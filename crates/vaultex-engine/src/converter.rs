use std::path::Path;

use crate::{
    assembler::{AssemblySettings, DocumentAssembler},
    error::{ConvertError, Result},
    planner::{ExecutionPlan, PlanWarning, PlannerSettings},
    template::TemplateEngine,
};

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub planner: PlannerSettings,
    pub assembly: AssemblySettings,
    pub job_template: String,
    pub main_template: String,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            planner: PlannerSettings::default(),
            assembly: AssemblySettings::default(),
            job_template: TemplateEngine::DEFAULT_TEMPLATE.to_string(),
            main_template: TemplateEngine::DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// The output of a successful run. Nothing is written to disk here.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub latex: String,
    /// Filtered BibTeX, when the document has a bibliography.
    pub bibliography: Option<String>,
    pub warnings: Vec<PlanWarning>,
}

/// Plans notes, then assembles them into one document.
pub struct Converter {
    settings: ConvertSettings,
    plan: ExecutionPlan,
}

impl Converter {
    pub fn new(settings: ConvertSettings) -> Result<Self> {
        if let Some(graphics) = &settings.assembly.graphics
            && !graphics.is_dir()
        {
            return Err(ConvertError::Configuration(format!(
                "graphics path {} is not a directory",
                graphics.display()
            )));
        }

        Ok(Self {
            plan: ExecutionPlan::new(settings.planner.clone()),
            settings,
        })
    }

    pub fn plan(&self) -> &ExecutionPlan {
        &self.plan
    }

    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        self.plan.add_file(path)
    }

    pub fn add_dir(&mut self, root: &Path) -> Result<()> {
        self.plan.add_dir(root)
    }

    /// Plans `input` as a vault when it is a directory, as a single note otherwise.
    pub fn add_path(&mut self, input: &Path) -> Result<()> {
        if input.is_dir() {
            self.add_dir(input)
        } else {
            self.add_file(input)
        }
    }

    pub fn convert(&self) -> Result<Conversion> {
        let mut assembler = DocumentAssembler::new(self.settings.assembly.clone());
        for job in self.plan.iter_jobs() {
            assembler.push_job(job?)?;
        }

        let templates =
            TemplateEngine::new(&*self.settings.job_template, &*self.settings.main_template);
        let (latex, bibliography) = assembler.finish(&templates)?;

        Ok(Conversion {
            latex,
            bibliography,
            warnings: self.plan.warnings().to_vec(),
        })
    }
}

/// Plans and converts `input` in one go.
pub fn convert_path(input: &Path, settings: ConvertSettings) -> Result<Conversion> {
    let mut converter = Converter::new(settings)?;
    converter.add_path(input)?;
    converter.convert()
}
