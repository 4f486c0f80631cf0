//! Фоновый опрос с фиксированным интервалом, привязанный к жизни страницы.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// Owned by the current component; set on cleanup and gone once it is disposed
fn stop_flag() -> StoredValue<bool> {
    let stopped = StoredValue::new(false);
    on_cleanup(move || {
        stopped.try_update_value(|v| *v = true);
    });
    stopped
}

fn is_stopped(flag: StoredValue<bool>) -> bool {
    flag.try_get_value().unwrap_or(true)
}

/// Runs `tick` every `interval_ms` until the owning component is disposed.
///
/// The first run happens after one interval; callers load initial data themselves.
/// A tick already in flight when the page closes still completes.
pub fn start_polling<F, Fut>(name: &'static str, interval_ms: u32, tick: F)
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let stopped = stop_flag();

    spawn_local(async move {
        log::debug!("Polling '{}' every {} ms", name, interval_ms);
        loop {
            TimeoutFuture::new(interval_ms).await;
            if is_stopped(stopped) {
                break;
            }
            tick().await;
        }
        log::debug!("Polling '{}' stopped", name);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_stops_with_owner() {
        let owner = Owner::new();
        let flag = owner.with(stop_flag);
        assert!(!is_stopped(flag));
        owner.cleanup();
        assert!(is_stopped(flag));
    }
}
