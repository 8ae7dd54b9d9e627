use serde::{Deserialize, Serialize};

/// Font families a drawing collaborator should use, CJK-capable on every
/// platform. Passed as a value to the renderer rather than set as
/// process-wide state, so two hosts with different needs can coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Generic family class, e.g. "sans-serif".
    pub family: String,
    /// Concrete faces in preference order.
    pub faces: Vec<String>,
}

impl FontConfig {
    /// Face list for the operating system this process runs on.
    pub fn for_platform() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    fn for_os(os: &str) -> Self {
        let faces: &[&str] = match os {
            "windows" => &["SimHei"],
            "macos" => &["PingFang SC", "STHeiti"],
            _ => &["WenQuanYi Micro Hei", "SimHei"],
        };
        Self {
            family: "sans-serif".to_string(),
            faces: faces.iter().map(|s| s.to_string()).collect(),
        }
    }
}
