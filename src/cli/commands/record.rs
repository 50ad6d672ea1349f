//! Record command implementation
//!
//! Manual measurement entry. Client-side validation (at least one value,
//! parseable numbers) happens before anything touches the store.

use super::{connect_service, status_icon, EXIT_CONFIG, EXIT_CONNECTION, EXIT_VALIDATION};
use crate::config::load_config;
use crate::domain::{UserId, VitalError, VitalRecord};
use clap::Args;

/// Arguments for the record command
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// User to record for
    #[arg(long)]
    pub user: String,

    /// Systolic blood pressure, mmHg
    #[arg(long)]
    pub systolic: Option<u32>,

    /// Diastolic blood pressure, mmHg
    #[arg(long)]
    pub diastolic: Option<u32>,

    /// Heart rate, bpm
    #[arg(long)]
    pub heart_rate: Option<u32>,

    /// Pulse rate, bpm
    #[arg(long)]
    pub pulse_rate: Option<u32>,

    /// Fasting blood sugar, mg/dL
    #[arg(long)]
    pub sugar_fasting: Option<u32>,

    /// Post-meal blood sugar, mg/dL
    #[arg(long)]
    pub sugar_post_meal: Option<u32>,

    /// Body temperature, degrees Celsius
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Oxygen saturation, percent
    #[arg(long)]
    pub spo2: Option<u32>,

    /// Respiration rate, breaths per minute
    #[arg(long)]
    pub respiration: Option<u32>,

    /// Body weight, kg
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height, cm
    #[arg(long)]
    pub height: Option<f64>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Measurement instant (RFC 3339), defaults to now
    #[arg(long)]
    pub date: Option<String>,
}

impl RecordArgs {
    fn build_draft(&self, user_id: UserId) -> Result<VitalRecord, String> {
        let mut builder = VitalRecord::builder(user_id);

        if let Some(raw) = &self.date {
            let instant = super::parse_cli_date(raw, false)?;
            builder = builder.date(instant);
        }
        if let Some(v) = self.systolic {
            builder = builder.systolic(v);
        }
        if let Some(v) = self.diastolic {
            builder = builder.diastolic(v);
        }
        if let Some(v) = self.heart_rate {
            builder = builder.heart_rate(v);
        }
        if let Some(v) = self.pulse_rate {
            builder = builder.pulse_rate(v);
        }
        if let Some(v) = self.sugar_fasting {
            builder = builder.blood_sugar_fasting(v);
        }
        if let Some(v) = self.sugar_post_meal {
            builder = builder.blood_sugar_post_meal(v);
        }
        if let Some(v) = self.temperature {
            builder = builder.temperature(v);
        }
        if let Some(v) = self.spo2 {
            builder = builder.oxygen_saturation(v);
        }
        if let Some(v) = self.respiration {
            builder = builder.respiration_rate(v);
        }
        if let Some(v) = self.weight {
            builder = builder.weight(v);
        }
        if let Some(v) = self.height {
            builder = builder.height(v);
        }
        if let Some(notes) = &self.notes {
            builder = builder.notes(notes.clone());
        }

        Ok(builder.build())
    }

    /// Execute the record command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let user_id = match UserId::new(self.user.clone()) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let draft = match self.build_draft(user_id.clone()) {
            Ok(d) => d,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let service = match connect_service(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to store");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        match service.record(draft).await {
            Ok(_) => {}
            Err(VitalError::Validation(message)) => {
                println!("❌ {message}");
                return Ok(EXIT_VALIDATION);
            }
            Err(e) => {
                println!("❌ Failed to save vitals");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        }

        println!("✅ Vitals recorded");
        println!();

        // Show the refreshed dashboard so out-of-range values are visible
        // immediately.
        if let Ok(cards) = service.dashboard(&user_id).await {
            for card in &cards {
                println!(
                    "{} {:<18} {:>8} {}",
                    status_icon(card.status),
                    card.label,
                    card.value,
                    card.unit
                );
            }
        }

        Ok(0)
    }
}
