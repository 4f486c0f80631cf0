//! Таблица строк «товар × количество» для форм прихода и отгрузки.

use crate::domain::a002_item::api::{fetch_item_options, unit_price_of};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_vnd, parse_vnd_input};
use contracts::domain::a002_item::Item;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// One editable line; `key` is stable for `<For>`
#[derive(Clone, Copy, Debug)]
pub struct LineVm {
    pub key: u64,
    pub item: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub unit_price: RwSignal<String>,
}

impl LineVm {
    pub fn new(key: u64) -> Self {
        Self {
            key,
            item: RwSignal::new(String::new()),
            quantity: RwSignal::new("1".to_string()),
            unit_price: RwSignal::new(String::new()),
        }
    }

    pub fn item_id(&self) -> i64 {
        parse_id(&self.item.get())
    }

    pub fn quantity_value(&self) -> i64 {
        parse_quantity(&self.quantity.get())
    }

    pub fn price_value(&self) -> Option<f64> {
        parse_vnd_input(&self.unit_price.get())
    }
}

pub fn parse_id(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

/// Non-numeric or negative input counts as zero
pub fn parse_quantity(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0).max(0)
}

/// Строки товаров с автоподстановкой цены и итогом
#[component]
#[allow(non_snake_case)]
pub fn ItemLinesEditor(
    lines: RwSignal<Vec<LineVm>>,
    /// Catalogue, loaded here when empty
    items: RwSignal<Vec<Item>>,
    /// Lets the user override the catalogue price
    #[prop(optional)]
    editable_price: bool,
) -> impl IntoView {
    let next_key = StoredValue::new(lines.with_untracked(|l| l.iter().map(|l| l.key).max().unwrap_or(0)) + 1);
    let (error, set_error) = signal::<Option<String>>(None);

    if items.with_untracked(Vec::is_empty) {
        spawn_local(async move {
            match fetch_item_options().await {
                Ok(list) => items.set(list),
                Err(e) => set_error.set(Some(e.into())),
            }
        });
    }

    let add_line = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        lines.update(|l| l.push(LineVm::new(key)));
    };

    let remove_line = move |key: u64| {
        lines.update(|l| {
            if l.len() > 1 {
                l.retain(|line| line.key != key);
            }
        });
    };

    let total = move || {
        let values: Vec<(i64, f64)> = lines.with(|l| {
            l.iter()
                .map(|line| (line.quantity_value(), line.price_value().unwrap_or(0.0)))
                .collect()
        });
        contracts::domain::a003_receipt::running_total(&values)
    };

    view! {
        <div class="line-editor">
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
            <table class="line-editor__table">
                <thead>
                    <tr>
                        <th>"Mặt hàng"</th>
                        <th>"Số lượng"</th>
                        <th>"Đơn giá"</th>
                        <th>"Thành tiền"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || lines.get()
                        key=|line| line.key
                        children=move |line: LineVm| {
                            // Catalogue price follows the picked item
                            Effect::new(move |_| {
                                let id = line.item_id();
                                let price = items.with(|list| unit_price_of(list, id));
                                if id > 0 {
                                    line.unit_price.set(format!("{:.0}", price));
                                }
                            });
                            let stock_warning = move || {
                                let id = line.item_id();
                                let qty = line.quantity_value();
                                items.with(|list| {
                                    list.iter()
                                        .find(|i| i.item_id == id)
                                        .filter(|i| !i.in_stock(qty))
                                        .map(|i| format!("Tồn kho chỉ còn {}", i.stock_quantity))
                                })
                            };
                            view! {
                                <tr>
                                    <td>
                                        <Select value=line.item>
                                            <option value="">"-- Chọn mặt hàng --"</option>
                                            <For
                                                each=move || items.get()
                                                key=|i| i.item_id
                                                children=move |i: Item| view! {
                                                    <option value=i.item_id.to_string()>{i.display_label()}</option>
                                                }
                                            />
                                        </Select>
                                        {move || stock_warning().map(|w| view! { <div class="form__hint form__hint--warning">{w}</div> })}
                                    </td>
                                    <td>
                                        <input
                                            type="number"
                                            min="1"
                                            class="form__input form__input--narrow"
                                            prop:value=move || line.quantity.get()
                                            on:input=move |ev| line.quantity.set(event_target_value(&ev))
                                        />
                                    </td>
                                    <td>
                                        {if editable_price {
                                            view! {
                                                <input
                                                    type="text"
                                                    class="form__input form__input--narrow"
                                                    prop:value=move || line.unit_price.get()
                                                    on:input=move |ev| line.unit_price.set(event_target_value(&ev))
                                                />
                                            }.into_any()
                                        } else {
                                            view! {
                                                <span>{move || format_vnd(line.price_value().unwrap_or(0.0))}</span>
                                            }.into_any()
                                        }}
                                    </td>
                                    <td class="table__cell--number">
                                        {move || format_vnd(line.quantity_value() as f64 * line.price_value().unwrap_or(0.0))}
                                    </td>
                                    <td>
                                        <button
                                            class="button button--icon"
                                            title="Xóa dòng"
                                            disabled=move || lines.with(|l| l.len() <= 1)
                                            on:click=move |_| remove_line(line.key)
                                        >
                                            {icon("trash")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <div class="line-editor__footer">
                <Button appearance=ButtonAppearance::Secondary on_click=add_line>
                    {icon("plus")}
                    " Thêm dòng"
                </Button>
                <div class="line-editor__total">
                    "Tổng cộng: "
                    <strong>{move || format_vnd(total())}</strong>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), 5);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("-3"), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity(""), 0);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7"), 7);
        assert_eq!(parse_id(""), 0);
    }
}
