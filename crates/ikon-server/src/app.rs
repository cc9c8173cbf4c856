//! Process wiring: storage backend, HTTP server, scheduler and bot.

use crate::di::{build_memory_module, build_mysql_module, DatabaseResolver, ServiceResolver};
use crate::startup::print_startup_info;
use ikon_bot::{BotService, CommandHandler, TelegramClient, TelegramNotifier};
use ikon_config::AppConfig;
use ikon_core::{HealthCheck, IkonError, IkonResult};
use ikon_jobs::{register_metrics, DailyReminderTask, LeaderboardRefreshTask, ScheduledTask, Scheduler};
use ikon_repository::DatabaseHealthCheck;
use ikon_rest::{create_router, AppState};
use ikon_service::Notifier;
use std::sync::Arc;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Runs the server until Ctrl-C or SIGTERM.
///
/// `memory://` database URLs select the in-memory repositories; anything
/// else is treated as a MySQL URL.
pub async fn run(config: AppConfig) -> IkonResult<()> {
    if config.database.is_memory() {
        warn!("Using in-memory storage; all data is lost on shutdown");
        let module = build_memory_module(config.security.clone());
        return serve(module.as_ref(), Vec::new(), &config).await;
    }

    let module = build_mysql_module(&config.database, config.security.clone()).await?;
    let pool = module.database_pool();
    if config.database.run_migrations {
        pool.run_migrations().await?;
    }

    let health_checks: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(DatabaseHealthCheck::new(pool.clone()))];
    let result = serve(module.as_ref(), health_checks, &config).await;
    pool.close().await;
    result
}

async fn serve<M: ServiceResolver>(
    module: &M,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    config: &AppConfig,
) -> IkonResult<()> {
    let state = health_checks.into_iter().fold(
        AppState::new(
            module.user_service(),
            module.character_service(),
            module.quest_service(),
            module.game_service(),
            module.leaderboard_service(),
            module.auth_service(),
        ),
        AppState::with_health_check,
    );
    let router = create_router(state, module.token_provider(), &config.server);

    let bot = build_bot(module, config)?;
    let notifier = bot.as_ref().map(|(_, notifier)| notifier.clone());
    let scheduler = Arc::new(build_scheduler(module, config, notifier)?);

    let scheduler_handle = config.scheduler.enabled.then(|| {
        register_metrics();
        let scheduler = scheduler.clone();
        tokio::spawn(async move {
            if let Err(e) = scheduler.start().await {
                error!(error = %e, "Scheduler stopped with an error");
            }
        })
    });
    if config.scheduler.enabled && config.scheduler.refresh_leaderboard_on_startup {
        if let Err(e) = scheduler.trigger_job(LeaderboardRefreshTask::NAME) {
            warn!(error = %e, "Startup leaderboard refresh was not triggered");
        }
    }

    let bot_handle: Option<(Arc<BotService>, JoinHandle<()>)> = bot.map(|(bot, _)| {
        let runner = bot.clone();
        (bot, tokio::spawn(async move { runner.start().await }))
    });

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| IkonError::Internal(format!("Failed to bind {addr}: {e}")))?;
    print_startup_info(config);
    info!("Starting REST server on http://{}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| IkonError::Internal(format!("REST server error: {e}")));

    scheduler.stop();
    if let Some(handle) = scheduler_handle {
        let _ = handle.await;
    }
    if let Some((bot, handle)) = bot_handle {
        bot.stop();
        let _ = handle.await;
    }

    info!("Server shutdown complete");
    served
}

/// Builds the bot and its notifier when `telegram` is active.
fn build_bot<M: ServiceResolver>(
    module: &M,
    config: &AppConfig,
) -> IkonResult<Option<(Arc<BotService>, Arc<dyn Notifier>)>> {
    if !config.telegram.is_active() {
        info!("Telegram bot disabled");
        return Ok(None);
    }

    let client = TelegramClient::new(&config.telegram)?;
    let handler = CommandHandler::new(
        module.user_service(),
        module.quest_service(),
        module.leaderboard_service(),
        config.telegram.mini_app_url.clone(),
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(client.clone()));

    Ok(Some((Arc::new(BotService::new(client, Arc::new(handler))), notifier)))
}

/// Registers the recurring jobs. The reminder needs a notifier.
pub fn build_scheduler<M: ServiceResolver>(
    module: &M,
    config: &AppConfig,
    notifier: Option<Arc<dyn Notifier>>,
) -> IkonResult<Scheduler> {
    let scheduler = Scheduler::from_config(&config.scheduler);
    let to_config_error = |e: ikon_jobs::JobError| IkonError::Configuration(e.to_string());

    let refresh: Arc<dyn ScheduledTask> = Arc::new(LeaderboardRefreshTask::new(module.leaderboard_service()));
    scheduler
        .schedule(&config.scheduler.leaderboard_cron, refresh)
        .map_err(to_config_error)?;

    if let Some(notifier) = notifier {
        let reminder: Arc<dyn ScheduledTask> = Arc::new(DailyReminderTask::new(module.user_service(), notifier));
        scheduler
            .schedule(&config.scheduler.daily_reminder_cron, reminder)
            .map_err(to_config_error)?;
    }

    Ok(scheduler)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::build_memory_module;
    use async_trait::async_trait;

    struct NullNotifier;

    #[async_trait]
    impl Notifier for NullNotifier {
        async fn send_notification(&self, _chat_id: i64, _text: &str) -> IkonResult<()> {
            Ok(())
        }
    }

    fn job_names(scheduler: &Scheduler) -> Vec<String> {
        let mut names: Vec<_> = scheduler.list_jobs().into_iter().map(|job| job.name).collect();
        names.sort();
        names
    }

    #[test]
    fn test_scheduler_without_bot_has_only_leaderboard_job() {
        let config = AppConfig::default();
        let module = build_memory_module(config.security.clone());

        let scheduler = build_scheduler(module.as_ref(), &config, None).unwrap();

        assert_eq!(job_names(&scheduler), ["leaderboard_refresh"]);
    }

    #[test]
    fn test_scheduler_with_notifier_adds_daily_reminder() {
        let config = AppConfig::default();
        let module = build_memory_module(config.security.clone());

        let scheduler = build_scheduler(module.as_ref(), &config, Some(Arc::new(NullNotifier))).unwrap();

        assert_eq!(job_names(&scheduler), ["daily_reminder", "leaderboard_refresh"]);
    }

    #[test]
    fn test_invalid_cron_is_configuration_error() {
        let mut config = AppConfig::default();
        config.scheduler.leaderboard_cron = "every hour".to_string();
        let module = build_memory_module(config.security.clone());

        let err = build_scheduler(module.as_ref(), &config, None).unwrap_err();

        assert!(matches!(err, IkonError::Configuration(_)));
    }

    #[test]
    fn test_bot_disabled_by_default() {
        let config = AppConfig::default();
        let module = build_memory_module(config.security.clone());

        assert!(build_bot(module.as_ref(), &config).unwrap().is_none());
    }

    #[test]
    fn test_bot_built_when_token_present() {
        let mut config = AppConfig::default();
        config.telegram.enabled = true;
        config.telegram.bot_token = "123:abc".to_string();
        let module = build_memory_module(config.security.clone());

        let built = build_bot(module.as_ref(), &config).unwrap();

        let (bot, _) = built.unwrap();
        assert!(!bot.is_running());
    }
}
