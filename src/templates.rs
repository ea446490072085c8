use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{movie, user},
    validation::{MAX_TITLE_LEN, MAX_YEAR_LEN},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const AVATAR_URL: &str = "https://helloflask.com/avatar.png";
const TOTORO_URL: &str = "https://helloflask.com/totoro.gif";

/// Per-request data every page shows: the current user and pending flash messages.
#[derive(Clone, Debug, Default)]
pub struct PageContext {
    pub user: Option<user::Model>,
    pub flashes: Vec<String>,
}

impl PageContext {
    fn heading(&self) -> String {
        match &self.user {
            Some(user) => format!("{}'s Watchlist", user.name),
            None => "Watchlist".to_string(),
        }
    }
}

pub fn index_page(ctx: &PageContext, movies: &[movie::Model]) -> String {
    page(
        ctx,
        "Watchlist",
        html! {
            p class="text-sm text-gray-500" { (movies.len()) " Titles" }

            form class="mt-4 flex flex-wrap items-end gap-3" method="post" action="/" {
                (movie_fields("", ""))
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add" }
            }

            ul class="mt-6 divide-y divide-gray-200" {
                @for movie in movies {
                    (movie_row(movie))
                }
            }
        },
    )
}

pub fn edit_page(ctx: &PageContext, movie: &movie::Model) -> String {
    page(
        ctx,
        "Edit item",
        html! {
            h3 class="text-lg font-semibold text-gray-900" { "Edit item" }
            form class="mt-4 flex flex-wrap items-end gap-3" method="post" action=(format!("/movie/edit/{}", movie.id)) {
                (movie_fields(&movie.title, &movie.year))
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Update" }
            }
        },
    )
}

pub fn not_found_page(ctx: &PageContext) -> String {
    page(
        ctx,
        "404 - Page Not Found",
        html! {
            h3 class="text-lg font-semibold text-gray-900" { "Page Not Found - 404" }
            a class="mt-4 inline-block text-blue-600 hover:text-blue-800" href="/" { "Go Back" }
        },
    )
}

pub fn error_page(ctx: &PageContext, message: &str) -> String {
    page(
        ctx,
        "Error",
        html! {
            h3 class="text-lg font-semibold text-gray-900" { "Error" }
            p class="mt-4 text-gray-700" { (message) }
            a class="mt-4 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
        },
    )
}

fn page(ctx: &PageContext, title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h2 class="flex items-center gap-3 text-2xl font-bold text-gray-900" {
                            img class="h-10 w-10 rounded-full" alt="Avatar" src=(AVATAR_URL);
                            (ctx.heading())
                        }
                        nav class="mt-4" {
                            a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "Home" }
                        }

                        @for message in &ctx.flashes {
                            div class="alert mt-4 rounded-md bg-yellow-50 px-4 py-2 text-sm text-yellow-800" { (message) }
                        }

                        div class="mt-6" { (body) }

                        footer class="mt-10 text-center text-xs text-gray-400" {
                            img class="mx-auto" alt="Walking Totoro" title="to~to~ro~" src=(TOTORO_URL);
                            small { "© 2018 " a href="https://helloflask.com" { "HelloFlask" } }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

fn movie_fields(title: &str, year: &str) -> Markup {
    html! {
        label class="block text-sm font-medium text-gray-700" {
            "Name "
            input class="mt-1 rounded-md border border-gray-300 px-3 py-2" type="text" name="title" value=(title) maxlength=(MAX_TITLE_LEN) autocomplete="off" required;
        }
        label class="block text-sm font-medium text-gray-700" {
            "Year "
            input class="mt-1 w-24 rounded-md border border-gray-300 px-3 py-2" type="text" name="year" value=(year) maxlength=(MAX_YEAR_LEN) autocomplete="off" required;
        }
    }
}

fn movie_row(movie: &movie::Model) -> Markup {
    html! {
        li class="flex items-center justify-between gap-4 py-3" {
            span class="text-gray-900" { (movie.title) " - " (movie.year) }
            span class="flex items-center gap-3 text-sm" {
                a class="text-blue-600 hover:text-blue-800" href=(format!("/movie/edit/{}", movie.id)) { "Edit" }
                form class="inline" method="post" action=(format!("/movie/delete/{}", movie.id)) {
                    button class="text-red-600 hover:text-red-800" type="submit" onclick="return confirm('Are you sure?')" { "Delete" }
                }
                a class="text-gray-500 hover:text-gray-700" href=(imdb_search_url(&movie.title)) target="_blank" rel="noopener noreferrer" title="Find this movie on IMDb" { "IMDb" }
            }
        }
    }
}

fn imdb_search_url(title: &str) -> String {
    format!("https://www.imdb.com/find?q={}", urlencoding::encode(title))
}
