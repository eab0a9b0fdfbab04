use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use doctor_cell::services::DoctorService;
use lab_cell::services::LabService;
use shared_database::{keys, AppState, Collection, LocalStore};
use shared_utils::format::format_inr;
use shared_utils::ids::next_timestamp_id;

use crate::error::WaitlistError;
use crate::models::{
    HistoryEntry, RequestStatus, RequestType, SubmitWaitlistRequest, WaitlistCounts,
    WaitlistItem, WaitlistQuery, WaitlistRequest, DEFAULT_LOCATION, DEFAULT_REQ_TIME,
    DEFAULT_TIME,
};

const DEFAULT_BED_TITLE: &str = "Bed Request";
const DEFAULT_BED_SUBTITLE: &str = "General Ward";

pub struct WaitlistService {
    store: Arc<LocalStore>,
    active: Collection<WaitlistRequest>,
    doctors: DoctorService,
    labs: LabService,
}

impl WaitlistService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            active: Collection::new(state.store.clone(), keys::ACTIVE_WAITLIST, Vec::new),
            doctors: DoctorService::new(state),
            labs: LabService::new(state),
        }
    }

    /// Places a new pending request at the head of the waitlist.
    pub async fn submit(&self, request: SubmitWaitlistRequest) -> Result<WaitlistRequest, WaitlistError> {
        let (title, subtitle, price) = self.describe(&request).await?;

        let mut active = self.active.list().await;
        let entry = WaitlistRequest {
            id: next_timestamp_id(active.iter().map(|r| r.id)),
            request_type: request.request_type,
            title,
            subtitle,
            location: request.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            time: request.time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
            price,
            status: RequestStatus::Pending,
            priority: request.priority.unwrap_or_default(),
            req_time: request.req_time.unwrap_or_else(|| DEFAULT_REQ_TIME.to_string()),
        };

        active.insert(0, entry.clone());
        self.active.save_all(&active).await?;

        info!("Waitlist request {} queued for {}", entry.id, entry.title);
        Ok(entry)
    }

    /// Title, subtitle and display price for a submission.
    async fn describe(
        &self,
        request: &SubmitWaitlistRequest,
    ) -> Result<(String, String, String), WaitlistError> {
        match request.request_type {
            RequestType::Doctor => {
                let id = request
                    .resource_id
                    .ok_or_else(|| WaitlistError::ValidationError("Doctor id is required".to_string()))?;
                let doctor = self
                    .doctors
                    .get_doctor(id)
                    .await
                    .map_err(|e| WaitlistError::ResourceNotFound(e.to_string()))?;
                Ok((doctor.name, doctor.specialty, format_inr(doctor.fee)))
            }
            RequestType::Lab => {
                let id = request
                    .resource_id
                    .ok_or_else(|| WaitlistError::ValidationError("Lab test id is required".to_string()))?;
                let lab = self
                    .labs
                    .get_lab(id)
                    .await
                    .map_err(|e| WaitlistError::ResourceNotFound(e.to_string()))?;
                Ok((lab.name, lab.category, format_inr(lab.price)))
            }
            RequestType::Bed => Ok((
                request
                    .title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BED_TITLE.to_string()),
                request
                    .subtitle
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BED_SUBTITLE.to_string()),
                request.price.clone().unwrap_or_default(),
            )),
        }
    }

    pub async fn list(&self, query: &WaitlistQuery) -> Vec<WaitlistItem> {
        let active = self.active.list().await;
        let totals = type_totals(&active);
        let mut seen: HashMap<RequestType, usize> = HashMap::new();
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        active
            .into_iter()
            .filter_map(|request| {
                let position = seen.entry(request.request_type).or_insert(0);
                *position += 1;
                let item = WaitlistItem {
                    position: *position,
                    total: totals.get(&request.request_type).copied().unwrap_or(0),
                    request,
                };
                matches_query(&item.request, query, search.as_deref()).then_some(item)
            })
            .collect()
    }

    pub async fn counts(&self) -> WaitlistCounts {
        let active = self.active.list().await;
        let totals = type_totals(&active);
        let count = |t: RequestType| totals.get(&t).copied().unwrap_or(0);

        WaitlistCounts {
            doctor: count(RequestType::Doctor),
            bed: count(RequestType::Bed),
            lab: count(RequestType::Lab),
            total: active.len(),
        }
    }

    /// Moves a pending request into the history with the given final status.
    pub async fn process(&self, request_id: i64, target: RequestStatus) -> Result<HistoryEntry, WaitlistError> {
        debug!("Processing waitlist request {} -> {}", request_id, target);

        let mut active = self.active.list().await;
        let index = active
            .iter()
            .position(|r| r.id == request_id)
            .ok_or(WaitlistError::RequestNotFound(request_id))?;

        let current = active[index].status;
        if !current.can_transition_to(&target) {
            warn!("Rejected transition {} -> {} for request {}", current, target, request_id);
            return Err(WaitlistError::InvalidStatusTransition {
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        let mut request = active.remove(index);
        request.status = target;
        let entry = HistoryEntry {
            request,
            final_status: target,
            processed_at: Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        };

        let mut history = self.history().await;
        history.push(entry.clone());

        self.active.save_all(&active).await?;
        self.store.save(keys::REQUEST_HISTORY, &history).await?;

        info!("Waitlist request {} {}", request_id, target);
        Ok(entry)
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.store.load_or_else(keys::REQUEST_HISTORY, Vec::new).await
    }

    pub async fn clear_history(&self) -> Result<bool, WaitlistError> {
        let removed = self.store.remove_item(keys::REQUEST_HISTORY).await?;
        info!("Request history cleared");
        Ok(removed)
    }
}

fn type_totals(requests: &[WaitlistRequest]) -> HashMap<RequestType, usize> {
    let mut totals = HashMap::new();
    for request in requests {
        *totals.entry(request.request_type).or_insert(0) += 1;
    }
    totals
}

fn matches_query(request: &WaitlistRequest, query: &WaitlistQuery, search: Option<&str>) -> bool {
    if query.status.is_some_and(|s| s != request.status) {
        return false;
    }
    if query.priority.is_some_and(|p| p != request.priority) {
        return false;
    }
    if query.request_type.is_some_and(|t| t != request.request_type) {
        return false;
    }

    match search {
        None => true,
        Some(needle) => {
            request.title.to_lowercase().contains(needle)
                || request.subtitle.to_lowercase().contains(needle)
                || request.id.to_string().contains(needle)
        }
    }
}
