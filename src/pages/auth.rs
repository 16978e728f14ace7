use crate::components::ui::{
    Alert, AlertDescription, AlertTone, Button, ButtonSize, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::session::{Activation, SessionContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

/// Renders `children` only while a credential is present.
///
/// The check is reactive, so ending the session anywhere below (sign out or
/// a 401) swaps the view for the login redirect.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let proceed = move || session.activation() == Activation::Proceed;

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=proceed fallback=|| view! { <Redirect path="/login" /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

/// Client-side checks before `POST /register`.
pub(crate) fn validate_registration(
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("Username is required.");
    }
    if password.is_empty() {
        return Err("Password is required.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}

#[component]
fn AuthCard(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"SharedDoc"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">{title}</CardTitle>
                        <CardDescription class="text-xs">{description}</CardDescription>
                    </CardHeader>
                    <CardContent>{children()}</CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
fn FormError(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            {move || {
                error.get().map(|e| {
                    view! {
                        <Alert tone=AlertTone::Destructive>
                            <AlertDescription class="text-xs">{e}</AlertDescription>
                        </Alert>
                    }
                })
            }}
        </Show>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let session = expect_context::<SessionContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        let api_client = session.client();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.login(&username_val, &password_val).await {
                // Beginning the session flips this page to its redirect.
                Ok(response) => session.begin(response.access_token, username_val),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <Show
            when=move || session.activation() == Activation::RedirectToLogin
            fallback=|| view! { <Redirect path="/documents" /> }
        >
            <AuthCard title="Log in" description="Use your username and password to continue.">
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="username" class="text-xs">"Username"</Label>
                        <Input
                            id="username"
                            placeholder="username"
                            autocomplete="username"
                            bind_value=username
                            required=true
                            class="h-8 text-sm"
                        />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="password" class="text-xs">"Password"</Label>
                        <Input
                            id="password"
                            r#type="password"
                            placeholder="••••••••"
                            autocomplete="current-password"
                            bind_value=password
                            required=true
                            class="h-8 text-sm"
                        />
                    </div>

                    <FormError error=error />

                    <Button
                        class="w-full"
                        size=ButtonSize::Sm
                        attr:disabled=move || loading.get()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if loading.get() { "Signing in..." } else { "Continue" }}
                        </span>
                    </Button>

                    <div class="pt-1 text-xs text-muted-foreground">
                        "No account? "
                        <a class="text-primary underline underline-offset-4" href="/register">"Register"</a>
                    </div>
                </form>
            </AuthCard>
        </Show>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let registered: RwSignal<Option<String>> = RwSignal::new(None);

    let session = expect_context::<SessionContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        if let Err(msg) =
            validate_registration(&username_val, &password_val, &confirm_password.get_untracked())
        {
            error.set(Some(msg.to_string()));
            return;
        }

        let api_client = session.client();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.register(&username_val, &password_val).await {
                Ok(user) => {
                    tracing::info!(username = %user.username, "registered");
                    let _ = registered.try_set(Some(user.username));
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <AuthCard title="Create an account" description="Pick a username and password.">
            <Show
                when=move || registered.get().is_none()
                fallback=move || view! {
                    <div class="flex flex-col gap-3 text-sm">
                        <p>
                            "Account "
                            <span class="font-medium">{move || registered.get().unwrap_or_default()}</span>
                            " created."
                        </p>
                        <a class="text-primary underline underline-offset-4 text-xs" href="/login">
                            "Continue to log in"
                        </a>
                    </div>
                }
            >
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="username" class="text-xs">"Username"</Label>
                        <Input
                            id="username"
                            autocomplete="username"
                            bind_value=username
                            required=true
                            class="h-8 text-sm"
                        />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="password" class="text-xs">"Password"</Label>
                        <Input
                            id="password"
                            r#type="password"
                            autocomplete="new-password"
                            bind_value=password
                            required=true
                            class="h-8 text-sm"
                        />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="confirm_password" class="text-xs">"Confirm password"</Label>
                        <Input
                            id="confirm_password"
                            r#type="password"
                            autocomplete="new-password"
                            bind_value=confirm_password
                            required=true
                            class="h-8 text-sm"
                        />
                    </div>

                    <FormError error=error />

                    <Button
                        class="w-full"
                        size=ButtonSize::Sm
                        attr:disabled=move || loading.get()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if loading.get() { "Creating account..." } else { "Register" }}
                        </span>
                    </Button>

                    <div class="pt-1 text-xs text-muted-foreground">
                        "Already registered? "
                        <a class="text-primary underline underline-offset-4" href="/login">"Log in"</a>
                    </div>
                </form>
            </Show>
        </AuthCard>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_checks_run_in_order() {
        assert_eq!(validate_registration("  ", "pw", "pw"), Err("Username is required."));
        assert_eq!(validate_registration("ann", "", ""), Err("Password is required."));
        assert_eq!(validate_registration("ann", "pw", "pW"), Err("Passwords do not match."));
        assert_eq!(validate_registration("ann", "pw", "pw"), Ok(()));
    }
}
