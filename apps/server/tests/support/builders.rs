use axum::body::Bytes;
use serde_json::{json, Value};

/// Converts a JSON value to request body bytes
pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// Builder for create payloads. Every required field has a default.
pub struct CaseBuilder {
    body: Value,
}

impl CaseBuilder {
    pub fn new(case_number: impl Into<String>) -> Self {
        let case_number = case_number.into();
        Self {
            body: json!({
                "case_number": case_number,
                "ucn": format!("UCN-{case_number}"),
                "description": "DOE, JOHN vs. ACME CORPORATION",
                "case_type": "CV - Contract Dispute",
                "status": "Active",
                "judge_name": "Maria Rodriguez",
                "filed_date": "2024-01-15",
                "county": "Orange",
                "location": "Div 12",
                "parties": [],
                "documents": []
            }),
        }
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.body[key] = value;
        self
    }

    pub fn description(self, description: &str) -> Self {
        self.set("description", json!(description))
    }

    pub fn case_type(self, case_type: &str) -> Self {
        self.set("case_type", json!(case_type))
    }

    pub fn status(self, status: &str) -> Self {
        self.set("status", json!(status))
    }

    pub fn judge(self, judge_name: &str) -> Self {
        self.set("judge_name", json!(judge_name))
    }

    pub fn filed(self, date: &str) -> Self {
        self.set("filed_date", json!(date))
    }

    pub fn county(self, county: &str) -> Self {
        self.set("county", json!(county))
    }

    pub fn party(mut self, name: &str, party_type: &str, attorney: Option<&str>) -> Self {
        let mut party = json!({"name": name, "type": party_type});
        if let Some(attorney) = attorney {
            party["attorney"] = json!(attorney);
        }
        if let Some(parties) = self.body["parties"].as_array_mut() {
            parties.push(party);
        }
        self
    }

    pub fn document(mut self, description: &str, pages: u32, date: &str) -> Self {
        if let Some(documents) = self.body["documents"].as_array_mut() {
            documents.push(json!({
                "description": description,
                "pages": pages,
                "date": date
            }));
        }
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        if let Some(map) = self.body.as_object_mut() {
            map.remove(key);
        }
        self
    }

    pub fn build(self) -> Value {
        self.body
    }
}
