//! Command-line stand-ins for the device location and notification services.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use weatherly_core::{
    Config, Coordinates, LocationError, ReminderConfig,
    device::{DailyReminder, LocationService, NotificationService, PermissionStatus},
};

/// Reports the `[home]` position from the config file.
///
/// Without a configured home the user has, in effect, denied access.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredLocation {
    home: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(home: Option<Coordinates>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl LocationService for ConfiguredLocation {
    async fn request_permission(&self) -> PermissionStatus {
        if self.home.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.home.ok_or_else(|| {
            LocationError::Unavailable("no [home] location in the config file".to_string())
        })
    }
}

/// Records the daily reminder schedule in the config file.
#[derive(Debug)]
pub struct ConfigNotifier {
    config: Mutex<Config>,
    confirm: bool,
}

impl ConfigNotifier {
    /// `confirm` asks the user before registering, like an OS permission prompt.
    pub fn new(config: Config, confirm: bool) -> Self {
        Self {
            config: Mutex::new(config),
            confirm,
        }
    }

    pub async fn reminder(&self) -> Option<ReminderConfig> {
        self.config.lock().await.reminder
    }
}

#[async_trait]
impl NotificationService for ConfigNotifier {
    async fn register(&self) -> bool {
        if !self.confirm {
            return true;
        }
        inquire::Confirm::new("Allow a daily forecast reminder?")
            .with_default(true)
            .prompt()
            .unwrap_or(false)
    }

    async fn schedule_daily(&self, reminder: &DailyReminder) -> Result<()> {
        let mut config = self.config.lock().await;
        config.reminder = Some(ReminderConfig {
            hour: reminder.hour,
            minute: reminder.minute,
        });
        config.save()
    }

    async fn cancel_all(&self) -> Result<()> {
        let mut config = self.config.lock().await;
        if config.reminder.take().is_some() {
            config.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherly_core::device::locate;

    #[tokio::test]
    async fn missing_home_denies_permission() {
        let service = ConfiguredLocation::new(None);
        assert_eq!(locate(&service).await, Err(LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn configured_home_is_reported() {
        let service = ConfiguredLocation::new(Some(Coordinates::new(51.5, -0.12)));
        assert_eq!(locate(&service).await, Ok(Coordinates::new(51.5, -0.12)));
    }
}
