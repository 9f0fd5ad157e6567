//! Template set selection and compilation.
//!
//! # Selection Rules
//! ```text
//! mandatory = baseline + augmentation
//!
//! augmentation:
//!     routing point        → routing template (replaces the family template)
//!     ELS family           → ELS template
//!     otherwise            → non-ELS template
//!
//! optional  = optional template, compiled on its own
//! ```

use serde::{Deserialize, Serialize};

use crate::device::DeviceProfile;
use crate::device::ModelFamily;
use crate::mapping::VariableMapping;
use crate::template::compiler::{compile_line, CompileError, PatternSet};
use crate::template::library::{TemplateLibrary, TemplateLine};

/// Which augmentation template joins the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Augmentation {
    Els,
    NonEls,
    Routing,
}

impl Augmentation {
    pub fn for_profile(profile: &DeviceProfile) -> Self {
        if profile.routing {
            return Augmentation::Routing;
        }
        match profile.family {
            ModelFamily::Els => Augmentation::Els,
            ModelFamily::NonEls => Augmentation::NonEls,
        }
    }

    fn lines<'a>(&self, library: &'a TemplateLibrary) -> &'a [TemplateLine] {
        match self {
            Augmentation::Els => &library.els,
            Augmentation::NonEls => &library.non_els,
            Augmentation::Routing => &library.routing,
        }
    }
}

/// Compiled mandatory and optional pattern sets for one device.
#[derive(Debug, Clone)]
pub struct CompiledTemplates {
    pub augmentation: Augmentation,
    pub mandatory: PatternSet,
    pub optional: PatternSet,
}

/// Compile every line of a template, failing on the first bad line.
pub fn compile_set(lines: &[TemplateLine], mapping: &VariableMapping) -> Result<PatternSet, CompileError> {
    lines.iter().map(|line| compile_line(&line.text, mapping)).collect()
}

/// Select and compile the templates that apply to a device profile.
pub fn compile_templates(
    library: &TemplateLibrary,
    profile: &DeviceProfile,
    mapping: &VariableMapping,
) -> Result<CompiledTemplates, CompileError> {
    let augmentation = Augmentation::for_profile(profile);

    let mut mandatory = compile_set(&library.baseline, mapping)?;
    mandatory.extend(compile_set(augmentation.lines(library), mapping)?);
    let optional = compile_set(&library.optional, mapping)?;

    tracing::debug!(
        ?augmentation,
        mandatory = mandatory.len(),
        optional = optional.len(),
        "Templates compiled"
    );

    Ok(CompiledTemplates {
        augmentation,
        mandatory,
        optional,
    })
}
