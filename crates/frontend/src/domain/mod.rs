pub mod a001_bodega;
pub mod a002_cliente;
pub mod a003_entrega;
pub mod a004_producto;
pub mod a005_lote;
pub mod a006_receta;
pub mod a007_parcela;
pub mod a009_evento;
