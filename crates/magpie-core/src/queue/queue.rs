//! The spontaneous message queue.
//!
//! Holds pending outbound messages, applies the content filter at enqueue
//! and again after any reformatting, enforces per-user daily caps and
//! cooldown, and delivers via injected hooks in insertion order. Messages
//! whose hooks fail stay queued and are retried on the next tick, with no
//! backoff and no attempt cap.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::config::QueueConfig;
use crate::error::{MotivationError, MotivationResult};
use crate::queue::hooks::{MessageDeliverer, MessageFormatter, SKIP_SENTINEL};
use crate::safety::{ContentSafetyFilter, RejectReason};
use crate::types::message::{
    DeliveryBlock, EnqueueParams, MessageStatus, SpontaneousMessage, Urgency,
    UserSpontaneousPrefs,
};

/// Per-call collaborators for a queue drain.
pub struct ProcessParams<'a> {
    /// Style formatter; absent means raw content goes out as-is.
    pub formatter: Option<&'a dyn MessageFormatter>,
    /// Transport hook; absent leaves every message queued.
    pub deliverer: Option<&'a dyn MessageDeliverer>,
    /// Users with a live session right now.
    pub active_sessions: &'a std::collections::HashSet<String>,
}

/// What one drain pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    /// Messages the pass looked at.
    pub examined: usize,
    pub delivered: usize,
    /// Expired past their TTL.
    pub archived: usize,
    /// Terminally skipped by the formatter.
    pub skipped: usize,
    /// Rejected by the post-format filter re-check.
    pub rejected: usize,
    /// Left queued by session or rate gates.
    pub deferred: usize,
    /// Left queued by a failing hook.
    pub failed: usize,
}

/// Monotonic queue counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueueMetrics {
    pub queued: u64,
    pub delivered: u64,
    pub skipped: u64,
    pub rejected: u64,
    pub expired: u64,
    pub evicted: u64,
    pub failed: u64,
}

/// Point-in-time queue view.
#[derive(Debug, Clone, Serialize)]
pub struct QueueStatus {
    pub pending: usize,
    pub delivered_audit: usize,
    pub users_tracked: usize,
    #[serde(flatten)]
    pub metrics: QueueMetrics,
}

/// The spontaneous message queue. Single writer; the ticker shares it
/// behind a mutex.
pub struct SpontaneousQueue {
    config: QueueConfig,
    clock: SharedClock,
    filter: ContentSafetyFilter,
    pending: VecDeque<SpontaneousMessage>,
    /// Delivered messages, oldest first, bounded.
    delivered: VecDeque<SpontaneousMessage>,
    prefs: HashMap<String, UserSpontaneousPrefs>,
    metrics: QueueMetrics,
}

impl SpontaneousQueue {
    pub fn new(config: QueueConfig, clock: SharedClock) -> Self {
        let filter = ContentSafetyFilter::new(config.min_content_len, config.max_content_len);
        Self {
            config,
            clock,
            filter,
            pending: VecDeque::new(),
            delivered: VecDeque::new(),
            prefs: HashMap::new(),
            metrics: QueueMetrics::default(),
        }
    }

    /// Queue on the wall clock with default config.
    pub fn with_defaults() -> Self {
        Self::new(QueueConfig::default(), crate::clock::system_clock())
    }

    /// Enqueue a candidate outbound message.
    ///
    /// The content filter runs first (`empty_content` / `content_rejected`
    /// denials). At capacity, the oldest low-urgency entry is evicted to
    /// make room; with none evictable the enqueue denies `queue_full`.
    pub fn enqueue_message(&mut self, params: EnqueueParams) -> MotivationResult<Uuid> {
        let verdict = self.filter.check(&params.content);
        if let Some(reason) = verdict.reason {
            self.metrics.rejected += 1;
            debug!(%reason, "enqueue rejected by content filter");
            return Err(match reason {
                RejectReason::EmptyContent => MotivationError::EmptyContent,
                other => MotivationError::ContentRejected {
                    reason: other.to_string(),
                },
            });
        }

        if self.pending.len() >= self.config.max_queue_size {
            match self
                .pending
                .iter()
                .position(|m| m.urgency == Urgency::Low)
            {
                Some(idx) => {
                    if let Some(mut evicted) = self.pending.remove(idx) {
                        evicted.status = MessageStatus::Archived;
                        self.metrics.evicted += 1;
                        info!(message = %evicted.id, "queue full: evicted oldest low-urgency message");
                    }
                }
                None => return Err(MotivationError::QueueFull),
            }
        }

        let message = SpontaneousMessage {
            id: Uuid::new_v4(),
            content: params.content,
            formatted_content: None,
            reason: params.reason,
            urgency: params.urgency,
            kind: params.kind,
            user_id: params.user_id,
            want_id: params.want_id,
            status: MessageStatus::Pending,
            created_at: self.clock.now(),
            delivered_at: None,
        };
        let id = message.id;
        debug!(message = %id, urgency = %message.urgency, "message queued");
        self.pending.push_back(message);
        self.metrics.queued += 1;
        Ok(id)
    }

    /// Enable or disable spontaneous delivery for a user.
    pub fn set_user_spontaneous_enabled(&mut self, user_id: impl Into<String>, enabled: bool) {
        let user_id = user_id.into();
        let prefs = self.prefs.entry(user_id.clone()).or_default();
        prefs.enabled = enabled;
        info!(user = %user_id, enabled, "spontaneous delivery preference set");
    }

    /// Whether a delivery to `user_id` would be allowed right now.
    pub fn can_deliver(&mut self, user_id: &str) -> bool {
        let now = self.clock.now();
        self.delivery_block(user_id, now).is_none()
    }

    /// Per-user prefs, if the user has ever been touched.
    pub fn user_prefs(&self, user_id: &str) -> Option<&UserSpontaneousPrefs> {
        self.prefs.get(user_id)
    }

    /// Drain the queue once, in insertion order.
    ///
    /// Per message: archive past the TTL; leave queued when the target has
    /// no session or a rate gate blocks; format (once) and re-filter if a
    /// formatter is supplied; deliver; record the delivery against the
    /// user's daily counter and cooldown. Hook errors leave the message
    /// queued for the next tick.
    pub async fn process_queue(&mut self, params: ProcessParams<'_>) -> ProcessReport {
        let now = self.clock.now();
        let ttl = Duration::hours(self.config.message_ttl_hours);
        let mut report = ProcessReport::default();
        let mut retained: VecDeque<SpontaneousMessage> = VecDeque::new();

        let queue = std::mem::take(&mut self.pending);
        for mut message in queue {
            report.examined += 1;

            if now - message.created_at >= ttl {
                message.status = MessageStatus::Archived;
                self.metrics.expired += 1;
                report.archived += 1;
                debug!(message = %message.id, "message expired past TTL");
                continue;
            }

            let has_session = match &message.user_id {
                Some(user) => params.active_sessions.contains(user),
                None => !params.active_sessions.is_empty(),
            };
            if !has_session {
                report.deferred += 1;
                retained.push_back(message);
                continue;
            }

            if let Some(user) = message.user_id.clone() {
                if let Some(block) = self.delivery_block(&user, now) {
                    debug!(message = %message.id, user = %user, block = %block, "delivery gated");
                    report.deferred += 1;
                    retained.push_back(message);
                    continue;
                }
            }

            if message.formatted_content.is_none() {
                if let Some(formatter) = params.formatter {
                    match formatter.format(&message).await {
                        Ok(Some(text))
                            if text != SKIP_SENTINEL && !text.trim().is_empty() =>
                        {
                            let verdict = self.filter.check(&text);
                            if let Some(reason) = verdict.reason {
                                message.status = MessageStatus::ContentRejected;
                                self.metrics.rejected += 1;
                                report.rejected += 1;
                                warn!(
                                    message = %message.id,
                                    %reason,
                                    "formatted content rejected by filter"
                                );
                                continue;
                            }
                            message.formatted_content = Some(text);
                        }
                        Ok(_) => {
                            message.status = MessageStatus::Skipped;
                            self.metrics.skipped += 1;
                            report.skipped += 1;
                            debug!(message = %message.id, "formatter skipped message");
                            continue;
                        }
                        Err(err) => {
                            warn!(message = %message.id, error = %err, "formatter failed; will retry");
                            self.metrics.failed += 1;
                            report.failed += 1;
                            retained.push_back(message);
                            continue;
                        }
                    }
                }
            }

            let Some(deliverer) = params.deliverer else {
                report.deferred += 1;
                retained.push_back(message);
                continue;
            };
            match deliverer.deliver(&message).await {
                Ok(()) => {
                    message.status = MessageStatus::Delivered;
                    message.delivered_at = Some(now);
                    if let Some(user) = message.user_id.clone() {
                        self.record_delivery(&user, now);
                    }
                    info!(message = %message.id, user = message.user_id.as_deref().unwrap_or("broadcast"), "message delivered");
                    self.delivered.push_back(message);
                    if self.delivered.len() > self.config.delivered_audit_cap {
                        self.delivered.pop_front();
                    }
                    self.metrics.delivered += 1;
                    report.delivered += 1;
                }
                Err(err) => {
                    warn!(message = %message.id, error = %err, "delivery failed; will retry");
                    self.metrics.failed += 1;
                    report.failed += 1;
                    retained.push_back(message);
                }
            }
        }

        self.pending = retained;
        if report.examined > 0 {
            debug!(
                delivered = report.delivered,
                deferred = report.deferred,
                archived = report.archived,
                "queue drain complete"
            );
        }
        report
    }

    /// Point-in-time queue view.
    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            pending: self.pending.len(),
            delivered_audit: self.delivered.len(),
            users_tracked: self.prefs.len(),
            metrics: self.metrics.clone(),
        }
    }

    /// Pending messages in delivery order.
    pub fn pending_messages(&self) -> impl Iterator<Item = &SpontaneousMessage> {
        self.pending.iter()
    }

    /// Delivered messages, oldest first.
    pub fn delivered_messages(&self) -> impl Iterator<Item = &SpontaneousMessage> {
        self.delivered.iter()
    }

    /// Why delivery to `user_id` is blocked right now, if it is.
    ///
    /// Rolls the user's daily counter over when the calendar date has
    /// changed since the last reset; the roll happens at most once per
    /// date change.
    fn delivery_block(&mut self, user_id: &str, now: DateTime<Utc>) -> Option<DeliveryBlock> {
        let cooldown = Duration::minutes(self.config.cooldown_minutes);
        let daily_cap = self.config.daily_cap;
        let prefs = self.prefs.entry(user_id.to_string()).or_default();

        let today = now.date_naive();
        if prefs.last_reset_date != Some(today) {
            prefs.daily_count = 0;
            prefs.last_reset_date = Some(today);
        }

        if !prefs.enabled {
            return Some(DeliveryBlock::UserDisabled);
        }
        if prefs.daily_count >= daily_cap {
            return Some(DeliveryBlock::DailyCapReached);
        }
        if let Some(last) = prefs.last_delivered_at {
            if now - last < cooldown {
                return Some(DeliveryBlock::CoolingDown);
            }
        }
        None
    }

    fn record_delivery(&mut self, user_id: &str, now: DateTime<Utc>) {
        let prefs = self.prefs.entry(user_id.to_string()).or_default();
        prefs.daily_count += 1;
        prefs.last_delivered_at = Some(now);
    }
}
