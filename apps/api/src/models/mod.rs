pub mod career;
pub mod profile;
pub mod resource;
pub mod riasec;
pub mod skill;

pub use career::{CareerDefinition, RequiredSkill, SalaryRange};
pub use profile::{CandidateProfile, EducationLevel};
pub use resource::ResourceRef;
pub use riasec::{RiasecDimension, RiasecVector};
pub use skill::{normalize_skill, SkillSet};
