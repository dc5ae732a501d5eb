use beacon::data::PageMeta;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PagerProps {
    pub meta: PageMeta,
    pub on_page: Callback<u32>,
}

/// Previous/next controls for a paginated list.
#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
    let PageMeta {
        page,
        page_size,
        total,
    } = props.meta;
    let last_page = last_page(total, page_size);

    let prev = {
        let on_page = props.on_page.clone();
        Callback::from(move |_| on_page.emit(page.saturating_sub(1).max(1)))
    };
    let next = {
        let on_page = props.on_page.clone();
        Callback::from(move |_| on_page.emit(page + 1))
    };

    html! {
        <div class="flex items-center gap-4 mt-4 text-sm">
            <button class="px-2 py-1 border rounded disabled:opacity-50" onclick={prev} disabled={page <= 1}>{ "Prev" }</button>
            <span>{ format!("Page {page} of {last_page} ({total} total)") }</span>
            <button class="px-2 py-1 border rounded disabled:opacity-50" onclick={next} disabled={page >= last_page}>{ "Next" }</button>
        </div>
    }
}

fn last_page(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::last_page;

    #[test]
    fn last_page_rounds_up() {
        assert_eq!(last_page(0, 20), 1);
        assert_eq!(last_page(20, 20), 1);
        assert_eq!(last_page(21, 20), 2);
        assert_eq!(last_page(5, 0), 1);
    }
}
