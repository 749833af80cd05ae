use thiserror::Error;

/// Unified error type for a report cycle.
///
/// Every variant is terminal for the run: nothing is retried and nothing is
/// logged to the finding log once one of these is returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Fetch(String),

    #[error("Respuesta no es JSON válido")]
    InvalidResponse,

    #[error("No se encontraron registros en la respuesta de la API.")]
    NoRecordsFound,

    #[error("No hay campos de velocidad ni de duración en el dataset.")]
    NoMetricAvailable,

    #[error("Error al escribir el registro: {0}")]
    Log(#[from] std::io::Error),
}

impl Error {
    /// Stable label for structured logs and JSON bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::Fetch(_) => "fetch_error",
            Error::InvalidResponse => "invalid_response",
            Error::NoRecordsFound => "no_records_found",
            Error::NoMetricAvailable => "no_metric_available",
            Error::Log(_) => "log_error",
        }
    }

    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Fetch(_) | Error::InvalidResponse | Error::NoRecordsFound => 502,
            Error::NoMetricAvailable => 422,
            Error::Config(_) | Error::Log(_) => 500,
        }
    }
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self {
        Error::Config(e.to_string())
    }
}
