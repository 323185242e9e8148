//! Seams to the device: position lookup and scheduled notifications.
//!
//! The core only decides *when* to ask; frontends supply the implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::{config::ReminderConfig, error::LocationError, model::Coordinates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Ask for permission, then for the position.
pub async fn locate(service: &dyn LocationService) -> Result<Coordinates, LocationError> {
    if service.request_permission().await != PermissionStatus::Granted {
        tracing::warn!("location permission denied");
        return Err(LocationError::PermissionDenied);
    }
    service.current_position().await
}

/// A notification repeated every day at a fixed local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReminder {
    pub hour: u8,
    pub minute: u8,
    pub title: String,
    pub body: String,
}

impl DailyReminder {
    pub fn at(time: ReminderConfig) -> Self {
        Self {
            hour: time.hour,
            minute: time.minute,
            title: "Today's Forecast".to_string(),
            body: "Check out the latest weather in Weatherly!".to_string(),
        }
    }

    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl Default for DailyReminder {
    fn default() -> Self {
        Self::at(ReminderConfig::default())
    }
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Returns whether the user allows notifications.
    async fn register(&self) -> bool;

    async fn schedule_daily(&self, reminder: &DailyReminder) -> Result<()>;

    async fn cancel_all(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    Enabled(String),
    Disabled,
    PermissionDenied,
}

/// On/off switch for the daily forecast reminder.
#[derive(Debug, Clone, Default)]
pub struct ReminderToggle {
    enabled: bool,
    reminder: DailyReminder,
}

impl ReminderToggle {
    pub fn new(reminder: DailyReminder, enabled: bool) -> Self {
        Self { enabled, reminder }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reminder(&self) -> &DailyReminder {
        &self.reminder
    }

    /// Register and (re)schedule; any earlier schedule is replaced.
    pub async fn enable(&mut self, service: &dyn NotificationService) -> Result<ReminderOutcome> {
        if !service.register().await {
            return Ok(ReminderOutcome::PermissionDenied);
        }

        service.cancel_all().await?;
        service.schedule_daily(&self.reminder).await?;
        self.enabled = true;

        let time = self.reminder.time_label();
        tracing::info!(%time, "daily reminder scheduled");
        Ok(ReminderOutcome::Enabled(format!(
            "Daily notification set for {time}"
        )))
    }

    pub async fn disable(&mut self, service: &dyn NotificationService) -> Result<ReminderOutcome> {
        service.cancel_all().await?;
        self.enabled = false;
        tracing::info!("daily reminder cancelled");
        Ok(ReminderOutcome::Disabled)
    }

    pub async fn toggle(&mut self, service: &dyn NotificationService) -> Result<ReminderOutcome> {
        if self.enabled {
            self.disable(service).await
        } else {
            self.enable(service).await
        }
    }
}
