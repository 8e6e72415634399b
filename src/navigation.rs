//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm md:bg-transparent
            md:text-blue-700 md:p-0 dark:text-white md:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
            md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0
            dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700
            dark:hover:text-white md:dark:hover:bg-transparent"
        };

        html!(
            li
            {
                a
                    href=(self.url)
                    class=(style)
                    aria-current=[self.is_current.then_some("page")]
                {
                    (self.title)
                }
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::AUTO_TRANSACTIONS_VIEW,
                title: "Rules",
                is_current: active_endpoint == endpoints::AUTO_TRANSACTIONS_VIEW,
            },
            Link {
                url: endpoints::NEW_AUTO_TRANSACTION_VIEW,
                title: "New Rule",
                is_current: active_endpoint == endpoints::NEW_AUTO_TRANSACTION_VIEW,
            },
            Link {
                url: endpoints::GRAPHQL,
                title: "GraphQL",
                is_current: false,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Auto Transactions"
                    }

                    ul
                        class="font-medium flex flex-col p-4 md:p-0 mt-4 border
                            border-gray-100 rounded-lg bg-gray-50 md:flex-row
                            md:space-x-8 rtl:space-x-reverse md:mt-0 md:border-0
                            md:bg-white dark:bg-gray-800 md:dark:bg-gray-900
                            dark:border-gray-700"
                    {
                        @for link in self.links {
                            (link.into_html())
                        }
                    }
                }
            }
        )
    }
}
