//! The Nuclio function descriptor document.
//!
//! Descriptors are built as a typed document and rendered with `serde_yaml`
//! rather than substituted into a text template. The two index-bearing
//! fields (`metadata.name` and the `FUNCTION_NAME` env entry) are both
//! filled from the same unit name at construction time, so they can never
//! disagree.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name prefix shared by every function unit.
pub const UNIT_NAME_PREFIX: &str = "namenode";

/// Container image every unit runs.
pub const FUNCTION_IMAGE: &str = "scusemua/java9-nuclio:latest";

/// Runtime identifier Nuclio uses to pick the wrapper for the handler.
pub const FUNCTION_RUNTIME: &str = "java";

/// Entry point class inside the image.
pub const FUNCTION_HANDLER: &str = "org.apache.hadoop.hdfs.serverless.NuclioHandler";

/// JVM flags passed to every unit.
pub const JVM_OPTIONS: [&str; 4] = [
    "-Dlog4j.debug",
    "-Djava.library.path=/native/",
    "-Dsun.io.serialization.extendedDebugInfo=true",
    "-Dlog4j.configuration=file:/conf/log4j.properties",
];

/// Name of the function unit at `index`: the fixed prefix plus the decimal
/// index (e.g., `namenode7`).
pub fn unit_name(index: u32) -> String {
    format!("{UNIT_NAME_PREFIX}{index}")
}

/// File name of the descriptor for the unit at `index`.
pub fn descriptor_file_name(index: u32) -> String {
    format!("{}.yaml", unit_name(index))
}

/// Full path of the descriptor for the unit at `index` inside `directory`.
///
/// This does *not* touch the filesystem.
pub fn descriptor_path(directory: &Path, index: u32) -> PathBuf {
    directory.join(descriptor_file_name(index))
}

/// Top-level Nuclio function descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: FunctionSpec,
}

/// Function identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
}

/// Runtime configuration of one function unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub image: String,
    pub runtime: String,
    pub handler: String,
    pub replicas: u32,
    pub resources: Resources,
    pub env: Vec<EnvVar>,
    pub platform: Platform,
    #[serde(rename = "runtimeAttributes")]
    pub runtime_attributes: RuntimeAttributes,
}

/// Requested and maximum compute resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub requests: ResourceSpec,
    pub limits: ResourceSpec,
}

/// One cpu/memory pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub cpu: f64,
    pub memory: String,
}

/// One environment variable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// Platform-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(rename = "healthCheck")]
    pub health_check: HealthCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub enabled: bool,
}

/// Runtime-specific attributes (JVM flags for the java runtime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeAttributes {
    #[serde(rename = "jvmOptions")]
    pub jvm_options: Vec<String>,
}

impl FunctionDescriptor {
    /// Build the descriptor for the unit at `index`.
    ///
    /// Every field except the unit name is fixed; the name is used both as
    /// `metadata.name` and as the `FUNCTION_NAME` env value.
    pub fn for_index(index: u32) -> Self {
        let name = unit_name(index);

        Self {
            api_version: "nuclio.io/v1".to_string(),
            kind: "NuclioFunction".to_string(),
            metadata: Metadata { name: name.clone() },
            spec: FunctionSpec {
                image: FUNCTION_IMAGE.to_string(),
                runtime: FUNCTION_RUNTIME.to_string(),
                handler: FUNCTION_HANDLER.to_string(),
                replicas: 0,
                resources: Resources {
                    requests: ResourceSpec { cpu: 0.5, memory: "1024M".to_string() },
                    limits: ResourceSpec { cpu: 1.5, memory: "1280M".to_string() },
                },
                env: vec![EnvVar { name: "FUNCTION_NAME".to_string(), value: name }],
                platform: Platform { health_check: HealthCheck { enabled: false } },
                runtime_attributes: RuntimeAttributes {
                    jvm_options: JVM_OPTIONS.iter().map(|opt| opt.to_string()).collect(),
                },
            },
        }
    }

    /// Render the descriptor as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
