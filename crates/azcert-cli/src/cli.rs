//! Command-line arguments.

use std::path::PathBuf;

use azcert_core::config::API_BASE_URL;
use azcert_core::models::{CertificateDraft, CodeInput, EmailMessage, placeholder_serial};
use azcert_core::search::SearchMode;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "azcert",
    version,
    about = "Back-office console for AZ International inspection certificates"
)]
pub struct Cli {
    /// Base URL of the certificate API
    #[arg(long, env = "AZCERT_API_URL", default_value = API_BASE_URL, global = true)]
    pub base_url: String,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every certificate, grouped by holder
    List,

    /// Search certificates by holder name or serial number
    Search(SearchArgs),

    /// Run the public verification search
    Verify {
        query: String,
        #[arg(long, default_value = "name")]
        mode: SearchMode,
    },

    /// Show one certificate (accepts `CERT-<id>`)
    Get { id: String },

    /// Create a certificate
    Create(CertificateArgs),

    /// Replace the fields of a certificate
    Update {
        id: String,
        #[command(flatten)]
        fields: CertificateArgs,
    },

    /// Delete a certificate
    Delete { id: String },

    /// Bulk-create certificates from a spreadsheet
    Upload { file: PathBuf },

    /// Send a contact-form message
    Email(EmailArgs),

    /// Print a placeholder serial number
    NewSerial,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SearchArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub serial: Option<String>,
}

/// Certificate fields; anything omitted is defaulted by the API client.
#[derive(Debug, Default, Args)]
pub struct CertificateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub serial: Option<String>,
    /// Method code 1-5
    #[arg(long)]
    pub method: Option<String>,
    /// Certificate type code (1 recertificate, 2 initial)
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Issue date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,
    /// Expiry date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
}

impl CertificateArgs {
    pub fn into_draft(self) -> CertificateDraft {
        CertificateDraft {
            name: self.name,
            serial_number: self.serial,
            method: self.method.as_deref().map(CodeInput::from),
            kind: self.kind.as_deref().map(CodeInput::from),
            start_date: self.start,
            end_date: self.end,
            location: None,
            country: self.country,
            state: self.state,
            street_address: self.street,
        }
    }

    /// Overlay the given fields on `base`, keeping every field left out.
    pub fn apply_to(self, base: CertificateDraft) -> CertificateDraft {
        let given = self.into_draft();
        CertificateDraft {
            name: given.name.or(base.name),
            serial_number: given.serial_number.or(base.serial_number),
            method: given.method.or(base.method),
            kind: given.kind.or(base.kind),
            start_date: given.start_date.or(base.start_date),
            end_date: given.end_date.or(base.end_date),
            location: base.location,
            country: given.country.or(base.country),
            state: given.state.or(base.state),
            street_address: given.street_address.or(base.street_address),
        }
    }

    /// Like [`into_draft`](Self::into_draft), filling a placeholder serial
    /// when none was given.
    pub fn into_new_draft(self) -> CertificateDraft {
        let mut draft = self.into_draft();
        draft.serial_number.get_or_insert_with(placeholder_serial);
        draft
    }
}

#[derive(Debug, Args)]
pub struct EmailArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}

impl From<EmailArgs> for EmailMessage {
    fn from(args: EmailArgs) -> Self {
        Self {
            user_name: args.name,
            user_email: args.email,
            subject: args.subject,
            message: args.message,
        }
    }
}
