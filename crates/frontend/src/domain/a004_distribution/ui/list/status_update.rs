use crate::domain::a004_distribution::api::update_distribution_status;
use crate::shared::notifications::use_notifications;
use contracts::domain::a004_distribution::{
    DistributionRequest, DistributionStatus, UpdateDistributionStatusDto,
};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Переход статуса с причиной; для завершённых записей ничего не рендерит
#[component]
#[allow(non_snake_case)]
pub fn StatusUpdate(
    issue: DistributionRequest,
    on_updated: Callback<DistributionRequest>,
) -> impl IntoView {
    let notifications = use_notifications();
    let id = issue.issue_id;
    let code = issue.code();
    let current = issue.status;
    let targets = current.allowed_targets();

    let target = RwSignal::new(
        targets
            .first()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
    );
    let reason = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);

    let apply = move |_| {
        let Some(next) = DistributionStatus::from_code(&target.get_untracked()) else {
            return;
        };
        let dto = match UpdateDistributionStatusDto::for_transition(current, next, &reason.get_untracked()) {
            Ok(dto) => dto,
            Err(message) => {
                notifications.error(message);
                return;
            }
        };
        is_saving.set(true);
        let code = code.clone();
        spawn_local(async move {
            match update_distribution_status(id, &dto).await {
                Ok(updated) => {
                    log::info!("Issue {} moved to {}", code, updated.status);
                    notifications.success(format!("{}: {}", code, updated.status.label()));
                    reason.set(String::new());
                    on_updated.run(updated);
                }
                Err(e) => notifications.error(e.messages().join("; ")),
            }
            is_saving.set(false);
        });
    };

    if targets.is_empty() {
        return ().into_any();
    }

    view! {
        <div class="status-update">
            <Select value=target size=SelectSize::Small>
                {targets.into_iter().map(|s| view! {
                    <option value=s.as_str()>{s.label()}</option>
                }).collect_view()}
            </Select>
            <Input value=reason placeholder="Lý do" />
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Primary
                on_click=apply
                disabled=Signal::derive(move || is_saving.get())
            >
                "Cập nhật"
            </Button>
        </div>
    }
    .into_any()
}
