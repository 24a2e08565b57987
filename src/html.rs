use maud::{DOCTYPE, Markup, html};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Card styles
pub const CARD_STYLE: &str = "w-full rounded-lg bg-white dark:bg-gray-800 \
    border border-gray-200 dark:border-gray-700 p-4 shadow-sm";
pub const CARD_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const CARD_VALUE_STYLE: &str = "text-2xl font-bold";

// Quick action buttons on the dashboard
pub const ACTION_BUTTON_STYLE: &str = "flex flex-col items-center gap-1 px-4 py-3 \
    rounded-lg bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 \
    hover:dark:bg-blue-700 text-white text-sm font-medium";

// List styles
pub const LIST_ROW_STYLE: &str = "flex items-center gap-3 py-3 \
    border-b last:border-b-0 border-gray-200 dark:border-gray-700";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - PeerPay" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";
            }

            body
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900 pb-[calc(5rem+env(safe-area-inset-bottom))] lg:pb-0"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// A summary card with a small label above a large value.
///
/// `value_id` is set as the ID of the element holding the value.
pub fn stat_card(label: &str, value: &str, value_id: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class=(CARD_LABEL_STYLE) { (label) }
            p id=(value_id) class=(CARD_VALUE_STYLE) { (value) }
        }
    }
}

/// A pill showing a transaction's status, e.g. "✓ Success".
pub fn status_badge(status: &str, bucket: crate::format::StatusBucket) -> Markup {
    html! {
        span
            class=(bucket.badge_style())
            data-status=(bucket.color())
        {
            span aria-hidden="true" class="me-1" { (bucket.glyph()) }
            (status)
        }
    }
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}
