use std::path::Path;

use leadtime_model::HeaderLookup;

use crate::error::{IngestError, Result};

pub const GUIDE_ALIASES: &[&str] = &["Guia", "Guía", "Nro Guia"];
pub const CLIENT_ALIASES: &[&str] = &["Cliente"];
pub const SUB_ACCOUNT_ALIASES: &[&str] = &["Subcuenta", "Sub cuenta"];
pub const AGENCY_ALIASES: &[&str] = &["Agencia destino"];
pub const LOCALITY_ALIASES: &[&str] = &["Localidad destino", "Loc"];
pub const PRODUCT_ALIASES: &[&str] = &["Producto"];
pub const STATUS_ALIASES: &[&str] = &["Estado"];
pub const HOME_DELIVERY_ALIASES: &[&str] = &["ED", "Entrega domicilio"];
pub const CREATED_ALIASES: &[&str] = &["Fecha", "Fecha creacion"];
pub const LAST_STATUS_ALIASES: &[&str] = &["Fecha último estado", "Fecha ult estado"];
pub const RECIPIENT_ALIASES: &[&str] = &["Destinatario"];

/// Actual header names of the shipment fields in one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentColumns {
    pub guide: Option<String>,
    pub client: String,
    pub sub_account: String,
    pub agency: String,
    pub locality: String,
    pub product: String,
    pub status: String,
    pub home_delivery: Option<String>,
    pub created: String,
    pub last_status: String,
    pub recipient: Option<String>,
}

impl ShipmentColumns {
    /// Match headers against the accepted aliases.
    ///
    /// Fails on the first required field with no matching header.
    pub fn resolve<S: AsRef<str>>(headers: &[S], path: &Path) -> Result<Self> {
        let lookup = HeaderLookup::new(headers.iter().map(AsRef::as_ref));
        let optional = |aliases: &[&str]| lookup.find_any(aliases).map(str::to_string);
        let required = |aliases: &[&str]| {
            optional(aliases).ok_or_else(|| IngestError::MissingColumn {
                column: aliases[0].to_string(),
                path: path.to_path_buf(),
            })
        };
        Ok(Self {
            guide: optional(GUIDE_ALIASES),
            client: required(CLIENT_ALIASES)?,
            sub_account: required(SUB_ACCOUNT_ALIASES)?,
            agency: required(AGENCY_ALIASES)?,
            locality: required(LOCALITY_ALIASES)?,
            product: required(PRODUCT_ALIASES)?,
            status: required(STATUS_ALIASES)?,
            home_delivery: optional(HOME_DELIVERY_ALIASES),
            created: required(CREATED_ALIASES)?,
            last_status: required(LAST_STATUS_ALIASES)?,
            recipient: optional(RECIPIENT_ALIASES),
        })
    }
}
