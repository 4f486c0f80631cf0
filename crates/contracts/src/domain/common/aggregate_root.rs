/// Трейт для корня агрегата
///
/// Каждый ресурс бэкенда описывает себя здесь: индекс агрегата, путь
/// коллекции в REST API и подписи для UI.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    /// ID записи, присвоенный бэкендом
    fn id(&self) -> Self::Id;

    /// Бизнес-код записи для отображения (например, "DL001" или "PX007")
    fn code(&self) -> String;

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Путь коллекции относительно базового пути API, с завершающим слэшем
    fn collection_path() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Путь конкретной записи: `{collection}{id}/`
    fn item_path(id: impl std::fmt::Display) -> String {
        format!("{}{}/", Self::collection_path(), id)
    }

    /// Ключ таба списка: `{index}_{collection}` без слэшей
    fn list_tab_key() -> String {
        let collection = Self::collection_path()
            .trim_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        format!("{}_{}", Self::aggregate_index(), collection)
    }
}
