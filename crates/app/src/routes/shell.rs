use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBookOpen, LdLayoutDashboard, LdLogOut, LdUsers};
use dioxus_free_icons::Icon;
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Initials, Navbar, Sidebar, SidebarContent,
    SidebarFooter, SidebarGroup, SidebarHeader, SidebarInset, SidebarMenuButton, SidebarMenuItem,
    SidebarProvider, SidebarTrigger,
};

use crate::dashboards::{Dashboard, NavIcon, NavItem};
use crate::guard::RoleGuard;
use crate::notify::{use_notifier, Notice, Notifier};
use crate::routes::Route;
use crate::session::use_session;

/// Sidebar, navbar and page outlet for one dashboard, behind its role guard.
#[component]
pub fn DashboardShell(dashboard: Dashboard) -> Element {
    let route: Route = use_route();
    let page_title = route.page_title();
    let nav_items = dashboard.nav_items();
    let group_label = format!("{} Dashboard", dashboard.title());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/shell.css") }

        RoleGuard { allowed: dashboard.allowed_roles().to_vec(),
            SidebarProvider { default_open: true,
                Sidebar {
                    SidebarHeader {
                        div { class: "sidebar-brand",
                            span { class: "sidebar-brand-name", "School Portal" }
                        }
                    }

                    SidebarContent {
                        SidebarGroup { label: group_label,
                            for item in nav_items {
                                NavEntry { active: item.route == route, item: item.clone() }
                            }
                        }
                    }

                    SidebarFooter {
                        SignOutButton {}
                    }
                }

                SidebarInset {
                    Navbar {
                        div { class: "navbar-bar",
                            SidebarTrigger {
                                span { class: "navbar-trigger-icon", "\u{2630}" }
                            }
                            span { class: "navbar-title", "{page_title}" }
                            div { class: "navbar-spacer" }
                            UserChip {}
                        }
                    }

                    div { class: "page-content",
                        Outlet::<Route> {}
                    }
                }
            }
        }
    }
}

#[component]
fn NavEntry(item: NavItem, active: bool) -> Element {
    let label = item.label;
    rsx! {
        SidebarMenuItem {
            Link { to: item.route,
                SidebarMenuButton { active: active,
                    match item.icon {
                        NavIcon::Overview => rsx! {
                            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
                        },
                        NavIcon::Classes => rsx! {
                            Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 }
                        },
                        NavIcon::Subjects => rsx! {
                            Icon::<LdBookOpen> { icon: LdBookOpen, width: 18, height: 18 }
                        },
                    }
                    "{label}"
                }
            }
        }
    }
}

/// Initials, name and role of whoever is signed in.
#[component]
fn UserChip() -> Element {
    let session = use_session().snapshot();
    let Some(user) = session.user() else {
        return rsx! {};
    };
    let initials = user.initials();
    let name = user.full_name();
    let role = user.role.label();

    rsx! {
        div { class: "navbar-user",
            Initials { text: initials }
            span { class: "navbar-user-name", "{name}" }
            Badge { variant: BadgeVariant::Secondary, "{role}" }
        }
    }
}

#[component]
fn SignOutButton() -> Element {
    let mut session = use_session();
    let mut signing_out = use_signal(|| false);
    let notifier = use_notifier();

    let sign_out = move |_: MouseEvent| {
        signing_out.set(true);
        spawn(async move {
            if let Err(e) = server::api::logout().await {
                tracing::warn!(error = %e, "logout request failed, clearing local session anyway");
            }
            session.sign_out();
            notifier.notify(Notice::info("You have been signed out."));
            navigator().push(Route::Login { redirect: None });
        });
    };

    rsx! {
        Button {
            variant: ButtonVariant::Ghost,
            disabled: signing_out(),
            onclick: sign_out,
            Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
            "Sign Out"
        }
    }
}
