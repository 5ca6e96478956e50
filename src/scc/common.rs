use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("n_nodes must be at least 1")]
    NoNodes,
    #[error("mean_out_degree must be finite and non-negative, got {0}")]
    InvalidDegree(f64),
}

/// Parameters for generating and checking random graphs.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub n_graphs: usize,
    pub n_nodes: usize,
    pub mean_out_degree: f64,
    pub allow_self_loops: bool,
    pub seed: u64,
}

impl Settings {
    pub fn standard() -> Settings {
        Settings {
            n_graphs: 1000,
            n_nodes: 200,
            mean_out_degree: 1.5,
            allow_self_loops: false,
            seed: 0,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.n_nodes == 0 {
            return Err(SettingsError::NoNodes);
        }
        if !self.mean_out_degree.is_finite() || self.mean_out_degree < 0. {
            return Err(SettingsError::InvalidDegree(self.mean_out_degree));
        }
        Ok(())
    }

    /// Probability that any particular node is picked as a target.
    pub fn edge_probability(&self) -> f64 {
        (self.mean_out_degree / self.n_nodes as f64).min(1.)
    }
}
