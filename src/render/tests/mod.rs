
use crate::error::FetchError;
use crate::pager::Pager;
use crate::render::Frame;
use crate::source::{PageSlice, catalog};

/// Frame after loading `pages` pages of a generated catalog with `len` records
fn frame_after_pages(len: usize, page_size: usize, pages: usize) -> Frame {
    let records = catalog::generate(len);
    let mut pager = Pager::new(page_size);
    for _ in 0..pages {
        if let Some(ticket) = pager.request_next() {
            let slice = PageSlice::from_records(&records, ticket.page(), page_size);
            pager.complete(ticket, Ok(slice));
        }
    }
    Frame::capture(1, "Product List", &pager)
}

/// Frame while the first page is still in flight
fn loading_frame() -> Frame {
    let mut pager = Pager::new(10);
    let _ticket = pager.request_next();
    Frame::capture(1, "Product List", &pager)
}

/// Frame after page 2 of 25 records failed
fn failed_frame() -> Frame {
    let records = catalog::generate(25);
    let mut pager = Pager::new(10);
    if let Some(ticket) = pager.request_next() {
        pager.complete(ticket, Ok(PageSlice::from_records(&records, 1, 10)));
    }
    if let Some(ticket) = pager.request_next() {
        pager.complete(ticket, Err(FetchError::Network("connection reset".to_string())));
    }
    Frame::capture(1, "Product List", &pager)
}
