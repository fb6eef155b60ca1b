//! Single-line encoding of a scenario, suitable for sharing on a command line.

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use sightline_core::{CellCoord, VisionConfig};

use crate::scenario::Scenario;

const LAYOUT_DOMAIN: &str = "fov";
const LAYOUT_VERSION: &str = "v1";

/// Identifier prefix emitted before the grid size and payload.
pub(crate) const LAYOUT_HEADER: &str = "fov:v1";
const FIELD_DELIMITER: char = ':';

/// Portable snapshot of a field-of-view query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutSnapshot {
    /// Number of cells along each grid edge.
    pub(crate) size: u32,
    /// Observer position.
    pub(crate) observer: CellCoord,
    /// Opaque cells.
    pub(crate) obstacles: Vec<CellCoord>,
    /// Maximum ring distance scanned.
    pub(crate) sight_radius: u32,
}

impl LayoutSnapshot {
    /// Encodes the snapshot as `fov:v1:<size>:<base64 json>`.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let payload = LayoutPayload {
            observer: self.observer,
            obstacles: self.obstacles.clone(),
            sight_radius: self.sight_radius,
        };
        let json = serde_json::to_vec(&payload).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!("{LAYOUT_HEADER}:{}:{encoded}", self.size))
    }

    /// Decodes a snapshot from its single-line representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::Empty);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let size = parts.next().ok_or(LayoutTransferError::MissingSize)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != LAYOUT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != LAYOUT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let size = parse_size(size)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: LayoutPayload =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self {
            size,
            observer: decoded.observer,
            obstacles: decoded.obstacles,
            sight_radius: decoded.sight_radius,
        })
    }
}

impl From<&Scenario> for LayoutSnapshot {
    fn from(scenario: &Scenario) -> Self {
        Self {
            size: scenario.size,
            observer: scenario.observer_coord(),
            obstacles: scenario.obstacle_coords(),
            sight_radius: scenario.vision.sight_radius,
        }
    }
}

impl From<LayoutSnapshot> for Scenario {
    fn from(snapshot: LayoutSnapshot) -> Self {
        Self {
            size: snapshot.size,
            observer: [snapshot.observer.x(), snapshot.observer.y()],
            obstacles: snapshot
                .obstacles
                .iter()
                .map(|coord| [coord.x(), coord.y()])
                .collect(),
            vision: VisionConfig::new(snapshot.sight_radius),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct LayoutPayload {
    observer: CellCoord,
    obstacles: Vec<CellCoord>,
    sight_radius: u32,
}

/// Errors that can occur while encoding or decoding layout strings.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    Empty,
    /// The prefix segment was missing.
    MissingPrefix,
    /// The version segment was missing.
    MissingVersion,
    /// The grid size segment was missing.
    MissingSize,
    /// The payload segment was missing.
    MissingPayload,
    /// The prefix segment named an unknown domain.
    InvalidPrefix(String),
    /// The version segment named an unsupported format revision.
    UnsupportedVersion(String),
    /// The grid size was not a positive integer.
    InvalidSize(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The JSON payload could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout string was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingSize => write!(f, "layout string is missing the grid size"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidSize(size) => write!(f, "could not parse grid size '{size}'"),
            Self::InvalidEncoding(error) => write!(f, "could not decode layout payload: {error}"),
            Self::InvalidPayload(error) => write!(f, "could not process layout payload: {error}"),
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_size(size: &str) -> Result<u32, LayoutTransferError> {
    match size.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(LayoutTransferError::InvalidSize(size.to_owned())),
    }
}
