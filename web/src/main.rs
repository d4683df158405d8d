use dioxus::prelude::*;

use ui::core::dom::{self, DomProbe};
use ui::core::platform::{self, HostProfile};
use ui::core::scheduler::AttachmentScheduler;
use ui::core::timing::SystemClock;
use ui::GymPanel;

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("[gym-ratios] logger unavailable: {err}");
    }

    // Resolved once; every host-specific decision reads this profile.
    let profile = HostProfile::detect();
    tracing::info!(
        host = profile.environment.as_str(),
        timeout_ms = profile.attach_timeout_ms,
        "gym ratios waiting for the gym page"
    );

    platform::spawn_future(async move {
        let mut scheduler = AttachmentScheduler::new(profile, SystemClock);
        scheduler
            .run(&DomProbe, |profile| {
                dom::mount_after_anchor().map(|()| launch_panel(profile))
            })
            .await;
    });
}

/// Mount the panel into the element inserted after the anchor, carrying the
/// profile the scheduler resolved at startup.
fn launch_panel(profile: HostProfile) {
    #[cfg(feature = "web")]
    dioxus::LaunchBuilder::web()
        .with_cfg(dioxus::web::Config::new().rootname(dom::MOUNT_ID))
        .with_context(profile)
        .launch(App);

    #[cfg(not(feature = "web"))]
    dioxus::LaunchBuilder::new().with_context(profile).launch(App);
}

#[component]
fn App() -> Element {
    let profile = use_context::<HostProfile>();

    rsx! {
        GymPanel { profile }
    }
}
