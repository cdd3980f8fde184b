use serde::{Deserialize, Serialize};

use crate::models::record_id;

/// A class the signed-in teacher manages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "ClassRecord")]
pub struct ClassSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_students: u32,
    /// Subject references; only the count is shown, so entries stay opaque.
    #[serde(default)]
    pub subjects: Vec<serde_json::Value>,
}

impl ClassSummary {
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }
}

/// A subject the signed-in teacher teaches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "SubjectRecord")]
pub struct SubjectSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Whether students may add themselves to this subject.
    #[serde(default)]
    pub allow_student_addition: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassRecord {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    name: String,
    #[serde(default)]
    total_students: u32,
    #[serde(default)]
    subjects: Vec<serde_json::Value>,
}

impl TryFrom<ClassRecord> for ClassSummary {
    type Error = String;

    fn try_from(r: ClassRecord) -> Result<Self, Self::Error> {
        Ok(ClassSummary {
            id: record_id(r.mongo_id, r.id, "class")?,
            name: r.name,
            total_students: r.total_students,
            subjects: r.subjects,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRecord {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    name: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    allow_student_addition: bool,
}

impl TryFrom<SubjectRecord> for SubjectSummary {
    type Error = String;

    fn try_from(r: SubjectRecord) -> Result<Self, Self::Error> {
        Ok(SubjectSummary {
            id: record_id(r.mongo_id, r.id, "subject")?,
            name: r.name,
            code: r.code,
            class_name: r.class_name,
            allow_student_addition: r.allow_student_addition,
        })
    }
}

/// Items that can be addressed by their API id.
pub trait Identified {
    fn item_id(&self) -> &str;
}

impl Identified for ClassSummary {
    fn item_id(&self) -> &str {
        &self.id
    }
}

impl Identified for SubjectSummary {
    fn item_id(&self) -> &str {
        &self.id
    }
}
